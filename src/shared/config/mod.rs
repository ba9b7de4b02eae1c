pub mod environment;
pub mod initialization;

pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig, StoreKind,
};
pub use initialization::{ensure_app_data_directory, resolve_session_file_path};
