pub mod report;
pub mod scan;

use colored::Colorize;

/// Print the startup banner
pub fn print_banner() {
    let banner = r#"
 ██████╗ ██╗   ██╗████████╗██╗     ██╗███╗   ██╗██╗  ██╗
██╔═══██╗██║   ██║╚══██╔══╝██║     ██║████╗  ██║██║ ██╔╝
██║   ██║██║   ██║   ██║   ██║     ██║██╔██╗ ██║█████╔╝
██║   ██║██║   ██║   ██║   ██║     ██║██║╚██╗██║██╔═██╗
╚██████╔╝╚██████╔╝   ██║   ███████╗██║██║ ╚████║██║  ██╗
 ╚═════╝  ╚═════╝    ╚═╝   ╚══════╝╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} {}",
        "outlink".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).cyan()
    );
    println!("  {}\n", "single-shot external reference scanner".bright_blue());
}
