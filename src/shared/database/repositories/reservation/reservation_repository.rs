use sqlx::{postgres::PgRow, PgPool, Row};
use anyhow::{Context, Result};
use crate::domains::reservation::models::{LatLng, Reservation};

pub struct ReservationRepository {
    pool: PgPool,
}

const RESERVATION_COLUMNS: &str = "reservation_id, req_id, user_id, channel_id, \
    pickup_lat, pickup_lng, dropoff_lat, dropoff_lng, scheduled_at, created_at";

pub(crate) fn row_to_reservation(row: &PgRow) -> Result<Reservation> {
    Ok(Reservation {
        reservation_id: row.try_get("reservation_id")?,
        req_id: row.try_get("req_id")?,
        user_id: row.try_get("user_id")?,
        channel_id: row.try_get("channel_id")?,
        pickup: LatLng {
            lat: row.try_get("pickup_lat")?,
            lng: row.try_get("pickup_lng")?,
        },
        dropoff: LatLng {
            lat: row.try_get("dropoff_lat")?,
            lng: row.try_get("dropoff_lng")?,
        },
        scheduled_at: row.try_get("scheduled_at")?,
        created_at: row.try_get("created_at")?,
    })
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// reqId로 예약 조회
    /// Get reservation by client request ID
    pub async fn get_by_req_id(&self, req_id: &str) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {} FROM reservations WHERE req_id = $1", RESERVATION_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(req_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch reservation by req_id")?;

        row.as_ref().map(row_to_reservation).transpose()
    }

    /// 예약 저장 (reqId 충돌 시 아무것도 하지 않고 None)
    /// Insert a reservation; returns None when `req_id` already exists
    ///
    /// UNIQUE(req_id) 제약이 동시 요청 중 하나만 통과시킴
    pub async fn insert_if_absent(&self, reservation: &Reservation) -> Result<Option<Reservation>> {
        let sql = format!(
            r#"
            INSERT INTO reservations ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (req_id) DO NOTHING
            RETURNING {cols}
            "#,
            cols = RESERVATION_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(&reservation.reservation_id)
            .bind(&reservation.req_id)
            .bind(&reservation.user_id)
            .bind(&reservation.channel_id)
            .bind(reservation.pickup.lat)
            .bind(reservation.pickup.lng)
            .bind(reservation.dropoff.lat)
            .bind(reservation.dropoff.lng)
            .bind(reservation.scheduled_at)
            .bind(reservation.created_at)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to insert reservation")?;

        row.as_ref().map(row_to_reservation).transpose()
    }

    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM reservations")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count reservations")?;

        Ok(row.try_get::<i64, _>("count")? as u64)
    }

    /// 전체 예약 (백업용, 생성 순)
    /// All reservations in creation order (for export)
    pub async fn get_all(&self) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {} FROM reservations ORDER BY created_at ASC, reservation_id ASC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch reservations")?;

        rows.iter().map(row_to_reservation).collect()
    }
}
