use serde::{Serialize, Serializer};

use crate::domain::price::total_revenue;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::store::Filter;

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminStats {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    #[serde(serialize_with = "whole_as_integer")]
    pub revenue: f64,
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole totals go out as JSON integers (`35`, not `35.0`).
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub async fn admin_stats(state: &AppState) -> Result<AdminStats, AppError> {
    let users = state.users().count().await?;
    let products = state.menu().count().await?;
    let payments = state.payments_collection().find(&Filter::All).await?;

    Ok(AdminStats {
        users,
        products,
        orders: payments.len() as u64,
        revenue: total_revenue(&payments),
    })
}
