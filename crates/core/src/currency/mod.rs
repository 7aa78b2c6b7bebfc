//! Currency module - conversion, rounding and display rules between the base
//! and the secondary currency.

mod currency_model;
mod currency_service;

pub use currency_model::MoneyView;
pub use currency_service::{
    convert, format_base, format_secondary, normalize_base_amount, round_base, round_secondary,
};
