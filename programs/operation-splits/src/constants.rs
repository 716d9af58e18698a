// Allocation bounds
pub const FULL_ALLOCATION_PERCENT: f64 = 100.0;
pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;

// Minimum share guaranteed to the operating company
pub const COMPANY_FLOOR_PERCENT: f64 = 36.0;

// Share assigned to a participant when first added to the roster
pub const DEFAULT_PILOT_SHARE: f64 = 14.0;
pub const DEFAULT_HELPER_SHARE: f64 = 8.0;

// Four-bucket editor defaults (empresa / piloto / ayudante / gastos)
pub const LEGACY_DEFAULT_EMPRESA: u32 = 36;
pub const LEGACY_DEFAULT_PILOTO: u32 = 40;
pub const LEGACY_DEFAULT_AYUDANTE: u32 = 14;
pub const LEGACY_DEFAULT_GASTOS: u32 = 10;
pub const LEGACY_REQUIRED_TOTAL: u32 = 100;

// Float tolerance when comparing a percentage total against 100
pub const PERCENT_EPSILON: f64 = 1e-9;

// es-CL number formatting: 1.234.567,5
pub const DEFAULT_GROUPING_SEPARATOR: char = '.';
pub const DEFAULT_DECIMAL_SEPARATOR: char = ',';

// Persisted date layout and the layout used by date inputs
pub const STORED_DATE_FORMAT: &str = "%d/%m/%Y";
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

// Ids handed out by the in-memory store: OP-001, OP-002, ...
pub const OPERATION_ID_PREFIX: &str = "OP-";
