use revocation_delta::ReconciliationStrategy;

mod deadline;
pub mod fetch_cmd;
pub mod reconcile_cmd;

pub fn setup_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::init_from_env(env);
}

pub fn load_dot_env() {
    let _ = dotenvy::dotenv();
}

/// Reads the `--strat_default` flag shared by both binaries. Only `True` selects the revoked
/// strategy; an absent flag means `False`.
pub fn strategy_from_flag(strat_default: Option<&str>) -> ReconciliationStrategy {
    ReconciliationStrategy::from(strat_default == Some("True"))
}
