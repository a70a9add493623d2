/// Entry point for the `git-fake-date` binary.
///
/// Exits with the code returned by the CLI entry function, or 1 after
/// printing the error.
fn main() {
    git_shims::cli::init_tracing();
    let code = git_shims::cli::exit_code(git_shims::cli::fake_date::entry());
    std::process::exit(code);
}
