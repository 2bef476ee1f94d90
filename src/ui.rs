use colored::*;
use terminal_size::{terminal_size, Height, Width};

pub fn print_header(model: &str) {
    let (width, _) = terminal_size().unwrap_or((Width(80), Height(24)));
    let width = width.0 as usize;

    let line = "─".repeat(width);
    println!("{}", line.black().bold());

    // Logo + Name
    let logo = "🍎";
    let name = "Chalk".yellow().bold();
    let version = format!("v{}", env!("CARGO_PKG_VERSION")).black().bold();

    println!("  {} {} {}", logo, name, version);

    // Model + session start time
    let started = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let info = format!("  {}  •  {}", model, started).cyan();
    println!("{}", info);

    println!("{}", line.black().bold());
}

pub fn print_step(msg: &str) {
    println!("  {} {}", "•".green(), msg);
}

pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠️ ".yellow().bold(), msg.yellow());
}

pub fn print_error(msg: &str) {
    println!("  {} {}", "❌".red().bold(), msg.red());
}
