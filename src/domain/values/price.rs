use rust_decimal::Decimal;

/// One currency unit in fixed-point quote units (8 decimal digits).
pub const QUOTE_FACTOR: i64 = 100_000_000;

pub fn quote_factor() -> Decimal {
    Decimal::from(QUOTE_FACTOR)
}
