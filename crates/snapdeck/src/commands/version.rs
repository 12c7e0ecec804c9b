use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "snapdeck".bold().yellow(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}
