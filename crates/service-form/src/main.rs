fn main() -> anyhow::Result<()> {
    service_form::cli::main()
}
