/// Name shown for rows left blank.
pub const DEFAULT_ITEM_NAME: &str = "Item";

/// Number of blank rows a fresh or reset session starts with.
pub const DEFAULT_ROW_COUNT: usize = 2;

/// Differences at or below this many currency units are treated as rounding noise.
pub const ADJUSTMENT_THRESHOLD: f64 = 1.0;

/// Currency prefix used when displaying amounts (Indonesian Rupiah).
pub const CURRENCY_PREFIX: &str = "Rp";

/// Thousands separator for the id-ID locale.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Decimal separator for the id-ID locale.
pub const DECIMAL_SEPARATOR: char = ',';
