mod output_path;

pub use output_path::datetime_string;
pub use output_path::derived_path;
pub use output_path::ensure_output_dir;
pub use output_path::file_stem;
pub use output_path::output_dir_for;
