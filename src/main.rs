use azure_topology_normalizer::input::{read_flags, read_raw_model, template_model};
use azure_topology_normalizer::models::RequirementFlags;
use azure_topology_normalizer::output::{print_summary, to_mermaid};
use azure_topology_normalizer::build_topology;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");

    log::info!("#Start main()");

    // Usage: azure-topology-normalizer [flags.json] [raw_model.json]
    let args: Vec<String> = std::env::args().collect();
    let flags = match args.get(1) {
        Some(path) => read_flags(path)?,
        None => RequirementFlags::default(),
    };
    let raw = match args.get(2) {
        Some(path) => read_raw_model(path)?,
        None => {
            log::info!("No raw model supplied, using the local template");
            template_model(&flags)
        }
    };

    let model = build_topology(raw, &flags);

    print_summary(&model);
    println!("\n{}", to_mermaid(&model));

    Ok(())
}
