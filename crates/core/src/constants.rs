use rust_decimal::Decimal;

/// Maximum length of a goal name, in characters
pub const GOAL_NAME_MAX_CHARS: usize = 255;

/// Decimal places kept for goal amounts and per-month splits
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Largest accepted goal amount, 9999999999999.99 (fits a DECIMAL(15, 2) column)
pub const MAX_GOAL_AMOUNT: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, 2);
