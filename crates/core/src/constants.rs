use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency quotes are priced in
pub const BASE_CURRENCY: &str = "COP";

/// Currency shown as an informational conversion
pub const SECONDARY_CURRENCY: &str = "USD";

/// Exchange rate offered to a new quote (base units per secondary unit)
pub const DEFAULT_EXCHANGE_RATE: Decimal = dec!(3500);

/// Decimal places kept for base currency amounts
pub const BASE_DECIMAL_PRECISION: u32 = 0;

/// Decimal places kept for secondary currency amounts
pub const SECONDARY_DECIMAL_PRECISION: u32 = 2;

/// Phrase the operator must type before a quote is deleted
pub const DELETE_CONFIRMATION_PHRASE: &str = "ELIMINAR";

/// Identity stamped on quotes fabricated in fixture mode
pub const FIXTURE_USER_ID: &str = "fixture-user";

/// Id given to quotes fabricated by a fixture-mode create
pub const FIXTURE_NEW_QUOTE_ID: &str = "fixture-new-id";

/// Simulated latency for a fixture-mode create, in milliseconds
pub const FIXTURE_CREATE_DELAY_MS: u64 = 1000;

/// Simulated latency for a fixture-mode delete, in milliseconds
pub const FIXTURE_DELETE_DELAY_MS: u64 = 500;
