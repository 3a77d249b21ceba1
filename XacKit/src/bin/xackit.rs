fn main() -> anyhow::Result<()> {
    xackit::cli::run_cli()
}
