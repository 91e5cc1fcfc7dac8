pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use coordinates::{is_within_seoul_bounds, validate_seoul_coordinates};
pub use filename::{default_dashboard_path, generate_default_parquet_filename};
pub use numeric::{coerce_numeric, normalize_code, Coerced};
pub use progress::ProgressReporter;
