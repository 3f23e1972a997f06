/// 멱등성 (Idempotency) 모듈
/// Idempotency primitives
///
/// 역할:
/// - 클라이언트가 보낸 키(reqId, txId)를 작업 종류별 네임스페이스로 묶음
/// - 최초 결과(201)와 재생 결과(200, `idempotent: true`)를 구분
/// - 인메모리 저장소용 insert-if-absent 맵 제공
///
/// PostgreSQL 저장소는 UNIQUE 제약으로 같은 계약을 구현함
use axum::http::StatusCode;
use std::collections::HashMap;
use std::fmt;

/// 멱등성 키 네임스페이스
/// Namespace of an idempotency key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdempotencyScope {
    Reservation,
    WalletDebit,
    WalletCredit,
}

impl IdempotencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdempotencyScope::Reservation => "reservation",
            IdempotencyScope::WalletDebit => "wallet_debit",
            IdempotencyScope::WalletCredit => "wallet_credit",
        }
    }
}

/// 작업 종류 + 클라이언트 키
/// Operation scope plus the client-supplied key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey {
    pub scope: IdempotencyScope,
    pub key: String,
}

impl IdempotencyKey {
    pub fn new(scope: IdempotencyScope, key: impl Into<String>) -> Self {
        Self { scope, key: key.into() }
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope.as_str(), self.key)
    }
}

/// 변경 작업 결과: 새로 생성됨 / 기존 결과 재생
/// Outcome of an idempotent mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Replayable<T> {
    Created(T),
    Replayed(T),
}

impl<T> Replayable<T> {
    pub fn is_replay(&self) -> bool {
        matches!(self, Replayable::Replayed(_))
    }

    /// 생성: 201 Created, 재생: 200 OK
    pub fn status_code(&self) -> StatusCode {
        match self {
            Replayable::Created(_) => StatusCode::CREATED,
            Replayable::Replayed(_) => StatusCode::OK,
        }
    }

    pub fn get(&self) -> &T {
        match self {
            Replayable::Created(value) | Replayable::Replayed(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Replayable::Created(value) | Replayable::Replayed(value) => value,
        }
    }
}

/// 인메모리 멱등성 저장소
/// In-process idempotency map
///
/// 동기화는 호출자가 담당 (저장소 락 안에서 사용)
#[derive(Debug, Clone)]
pub struct IdempotencyMap<T> {
    entries: HashMap<IdempotencyKey, T>,
}

impl<T> Default for IdempotencyMap<T> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<T: Clone> IdempotencyMap<T> {
    pub fn lookup(&self, key: &IdempotencyKey) -> Option<&T> {
        self.entries.get(key)
    }

    /// 키가 없을 때만 `produce`를 실행하고 결과를 기록
    /// Runs `produce` only when the key is new and records its result
    ///
    /// `produce`가 실패하면 아무것도 기록하지 않음 (같은 키로 재시도 가능)
    pub fn insert_if_absent<E>(
        &mut self,
        key: IdempotencyKey,
        produce: impl FnOnce() -> Result<T, E>,
    ) -> Result<Replayable<T>, E> {
        if let Some(existing) = self.entries.get(&key) {
            return Ok(Replayable::Replayed(existing.clone()));
        }
        let value = produce()?;
        self.entries.insert(key, value.clone());
        Ok(Replayable::Created(value))
    }

    /// 검증 없이 기록 (스냅샷 복원용)
    /// Records without producing; used when restoring a snapshot
    pub fn restore(&mut self, key: IdempotencyKey, value: T) {
        self.entries.insert(key, value);
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(scope: IdempotencyScope, k: &str) -> IdempotencyKey {
        IdempotencyKey::new(scope, k)
    }

    #[test]
    fn second_insert_replays_first_value() {
        let mut map = IdempotencyMap::default();
        let first = map
            .insert_if_absent::<()>(key(IdempotencyScope::Reservation, "REQ-1"), || Ok(1))
            .unwrap();
        let second = map
            .insert_if_absent::<()>(key(IdempotencyScope::Reservation, "REQ-1"), || Ok(2))
            .unwrap();

        assert_eq!(first, Replayable::Created(1));
        assert_eq!(second, Replayable::Replayed(1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn replay_does_not_run_producer() {
        let mut map = IdempotencyMap::default();
        map.insert_if_absent::<()>(key(IdempotencyScope::WalletDebit, "TX-1"), || Ok("a"))
            .unwrap();
        let mut calls = 0;
        map.insert_if_absent::<()>(key(IdempotencyScope::WalletDebit, "TX-1"), || {
            calls += 1;
            Ok("b")
        })
        .unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn scopes_do_not_collide() {
        let mut map = IdempotencyMap::default();
        map.insert_if_absent::<()>(key(IdempotencyScope::WalletDebit, "TX-1"), || Ok("debit"))
            .unwrap();
        let credit = map
            .insert_if_absent::<()>(key(IdempotencyScope::WalletCredit, "TX-1"), || Ok("credit"))
            .unwrap();
        assert_eq!(credit, Replayable::Created("credit"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn failed_producer_records_nothing() {
        let mut map: IdempotencyMap<u32> = IdempotencyMap::default();
        assert!(map.is_empty());
        let result = map.insert_if_absent(key(IdempotencyScope::Reservation, "REQ-9"), || {
            Err("store unavailable")
        });
        assert!(result.is_err());
        assert!(map.lookup(&key(IdempotencyScope::Reservation, "REQ-9")).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn status_codes_distinguish_create_and_replay() {
        assert_eq!(Replayable::Created(()).status_code(), StatusCode::CREATED);
        assert_eq!(Replayable::Replayed(()).status_code(), StatusCode::OK);
    }
}
