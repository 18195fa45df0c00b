fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Chess rules engine - terminal");

    if let Err(e) = chess_rules::terminal::run_interactive_terminal() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
