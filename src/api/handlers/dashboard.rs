//! Month grid for the dashboard.

use axum::Json;
use chrono::{Datelike, Local};

use crate::api::error::{ApiError, Result};
use crate::api::types::DashboardResponse;
use crate::calendar::calculate_layout;

/// GET /api/dashboard/ - Current month laid out in Sunday-first weeks.
pub async fn dashboard() -> Result<Json<DashboardResponse>> {
    let today = Local::now().date_naive();
    let layout = calculate_layout(today.year(), today.month(), today)
        .ok_or_else(|| ApiError::Internal(format!("cannot lay out month of {today}")))?;

    Ok(Json(DashboardResponse::from(&layout)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dashboard_describes_current_month() {
        let today = Local::now().date_naive();

        let Json(response) = dashboard().await.unwrap();

        assert_eq!(response.year, today.year());
        assert_eq!(response.month, today.month());
        assert!(response.weeks.iter().all(|week| week.len() == 7));
        assert!(response.days.iter().any(|d| d.day == today.day()));
    }
}
