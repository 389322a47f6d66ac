fn main() {
    if let Err(e) = portfolio_voice_lib::run_cli() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
