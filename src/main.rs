use clap::Parser;
use hazardos_estimator::core::export::export_csv;
use hazardos_estimator::domain::ports::ConfigProvider;
use hazardos_estimator::utils::{logger, validation::Validate};
use hazardos_estimator::{
    CliConfig, Estimate, EstimateEngine, EstimateError, LocalStorage, SupabaseStore,
    SurveyPipeline, TomlConfig,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting HazardOS estimator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)?;
            if let Err(e) = config.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("{}", e);
                std::process::exit(1);
            }
            run(cli.survey_id, config, cli.export_csv).await
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("{}", e);
                std::process::exit(1);
            }
            let export = cli.export_csv;
            run(cli.survey_id, cli, export).await
        }
    };

    match result {
        Ok(estimate) => {
            tracing::info!("Estimate {} saved as draft", estimate.id);
            println!("Estimate {} created", estimate.id);
            println!("  subtotal: {}", estimate.subtotal);
            println!("  total:    {}", estimate.total);
        }
        Err(e) => {
            tracing::error!("Estimate run failed: {} (HTTP {})", e, e.http_status());
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run<C>(
    survey_id: Uuid,
    config: C,
    export: bool,
) -> std::result::Result<Estimate, EstimateError>
where
    C: ConfigProvider,
{
    let store = SupabaseStore::new(
        config.api_endpoint().to_string(),
        config.api_key().to_string(),
    );
    let output_path = config.output_path().to_string();

    let pipeline = SurveyPipeline::new(store, config);
    let engine = EstimateEngine::new(pipeline);
    let estimate = engine.run(survey_id).await?;

    if export {
        let storage = LocalStorage::new(output_path);
        let filename = export_csv(&storage, &estimate).await?;
        tracing::info!("Line items exported to {}", filename);
    }

    Ok(estimate)
}
