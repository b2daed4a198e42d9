use anyhow::Result;
use e2e_tests::scenarios;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("e2e_tests=debug,info")
        .init();

    println!("Running {} E2E scenarios...", scenarios::ALL.len());

    for (name, scenario) in scenarios::ALL {
        println!("\n▶ {}", name);
        scenario()?;
        println!("✅ {}", name);
    }

    println!("\n✅ All E2E tests passed!");

    Ok(())
}
