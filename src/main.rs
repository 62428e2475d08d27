use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use tco::validation::{
    compatibility_warnings, optimization_suggestions, result_warnings, validate_request,
};
use tco::{
    CalculationRequest, CalculationResult, Calculator, Catalog, DeploymentType, Quantization,
    UseCase,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "LLM deployment TCO and GPU sizing calculator", long_about = None)]
struct Args {
    /// Path to the TOML catalog of models, GPUs, and pricing
    #[arg(short, long, default_value = "data/catalog.toml")]
    catalog: PathBuf,

    /// Model id to size for (see --show-catalog for the list)
    #[arg(short, long)]
    model: Option<String>,

    /// Use case: inference or training
    #[arg(short, long, default_value = "inference")]
    use_case: String,

    /// Quantization: fp16, int8, or int4
    #[arg(short, long, default_value = "fp16")]
    quantization: String,

    /// Cloud provider id for the comparison
    #[arg(short, long, default_value = "aws")]
    provider: String,

    /// Time horizon in months (1-120)
    #[arg(short = 't', long, default_value_t = 36)]
    months: u32,

    /// Electricity cost in $/kWh
    #[arg(short, long, default_value_t = 0.12)]
    electricity_cost: f64,

    /// Deployment type: on-premises, cloud-only, or hybrid
    #[arg(short, long, default_value = "on-premises")]
    deployment: String,

    /// Minimal output (recommendation and totals only)
    #[arg(long)]
    quiet: bool,

    /// Print the reference catalog tables and exit
    #[arg(long)]
    show_catalog: bool,

    /// Save the full calculation result to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Tabled)]
struct GpuRow {
    #[tabled(rename = "GPU")]
    name: String,
    #[tabled(rename = "VRAM")]
    vram: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "$/GB")]
    price_per_gb: String,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Model")]
    name: String,
    #[tabled(rename = "Params")]
    parameters: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Inference FP16")]
    inference_fp16: String,
}

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "Instance")]
    name: String,
    #[tabled(rename = "GPU")]
    gpu: String,
    #[tabled(rename = "Count")]
    count: String,
    #[tabled(rename = "Hourly")]
    hourly: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "Cost line")]
    line: String,
    #[tabled(rename = "On-Premises")]
    onprem: String,
    #[tabled(rename = "Cloud")]
    cloud: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let use_color = !args.no_color;

    let catalog = match Catalog::from_file(&args.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog {:?}: {}", args.catalog, e);
            std::process::exit(1);
        }
    };

    if args.show_catalog {
        print_catalog(&catalog);
        return;
    }

    let model_id = match &args.model {
        Some(id) => id.clone(),
        None => {
            eprintln!("A model id is required (use --model; see --show-catalog for the list)");
            std::process::exit(1);
        }
    };

    let request = match build_request(&args, model_id) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = validate_request(&request, &catalog);
    if !report.is_valid() {
        for error in &report.errors {
            if use_color {
                eprintln!("{} {}: {}", "error".red().bold(), error.field, error.message);
            } else {
                eprintln!("error {}: {}", error.field, error.message);
            }
        }
        std::process::exit(1);
    }

    let mut warnings = report.warnings;
    if let Some(model) = catalog.find_model(&request.model_id) {
        warnings.extend(compatibility_warnings(
            model,
            request.use_case,
            request.quantization,
        ));
    }

    let calculator = Calculator::new(&catalog);
    let result = match calculator.calculate(&request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Calculation error: {}", e);
            std::process::exit(1);
        }
    };

    warnings.extend(result_warnings(&result));

    if args.quiet {
        print_result_quiet(&result);
    } else {
        print_result(&result, &request, &warnings, use_color);
    }

    if let Some(output_path) = &args.output {
        match save_result_json(&result, output_path) {
            Ok(_) => println!("\nResult saved to: {:?}", output_path),
            Err(e) => eprintln!("Error saving result to JSON: {}", e),
        }
    }
}

fn build_request(args: &Args, model_id: String) -> Result<CalculationRequest, String> {
    Ok(CalculationRequest {
        model_id,
        use_case: UseCase::from_str(&args.use_case)?,
        quantization: Quantization::from_str(&args.quantization)?,
        deployment_type: DeploymentType::from_str(&args.deployment)?,
        time_horizon_months: args.months,
        electricity_cost_per_kwh: args.electricity_cost,
        cloud_provider: args.provider.clone(),
    })
}

fn fmt_usd(amount: f64) -> String {
    format!("${:.0}", amount)
}

fn print_catalog(catalog: &Catalog) {
    println!("MODELS");
    let model_rows: Vec<ModelRow> = catalog
        .models
        .iter()
        .map(|m| ModelRow {
            id: m.id.clone(),
            name: m.name.clone(),
            parameters: format!("{}B", m.parameters_b),
            category: m.category.clone(),
            inference_fp16: m
                .memory_requirements
                .get("inference_fp16")
                .map(|gb| format!("{} GB", gb))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    println!("{}", Table::new(&model_rows).with(Style::rounded()).to_string());

    println!("\nGPUS");
    let gpu_rows: Vec<GpuRow> = catalog
        .gpus
        .iter()
        .map(|g| GpuRow {
            name: g.name.clone(),
            vram: format!("{} GB", g.vram_gb),
            price: fmt_usd(g.price_usd),
            power: format!("{}W", g.power_watts),
            price_per_gb: fmt_usd(g.price_per_gb()),
        })
        .collect();
    println!("{}", Table::new(&gpu_rows).with(Style::rounded()).to_string());

    for (id, provider) in &catalog.cloud_providers {
        println!("\nCLOUD: {} ({})", provider.name, id);
        let rows: Vec<InstanceRow> = provider
            .instances
            .iter()
            .map(|(name, instance)| InstanceRow {
                name: name.clone(),
                gpu: instance.gpu.clone(),
                count: format!("{}x", instance.gpu_count),
                hourly: format!("${:.2}/hr", instance.hourly_rate),
                monthly: fmt_usd(instance.hourly_rate * 720.0),
            })
            .collect();
        println!("{}", Table::new(&rows).with(Style::rounded()).to_string());
    }
}

fn print_result(
    result: &CalculationResult,
    request: &CalculationRequest,
    warnings: &[String],
    use_color: bool,
) {
    if use_color {
        println!("{}", "LLM Deployment Cost Estimate".bright_cyan().bold());
    } else {
        println!("LLM Deployment Cost Estimate");
    }
    println!(
        "  Model: {} ({}B, {} {})",
        result.model.name,
        result.model.parameters_b,
        request.use_case.as_str(),
        result.quantization.as_str().to_uppercase()
    );
    println!(
        "  Horizon: {} months at ${:.2}/kWh",
        request.time_horizon_months, request.electricity_cost_per_kwh
    );
    println!(
        "  Required memory: {} GB VRAM",
        result.required_memory_gb
    );

    // Hardware recommendation
    if use_color {
        println!("\n{}", "RECOMMENDED HARDWARE".yellow().bold());
    } else {
        println!("\nRECOMMENDED HARDWARE");
    }
    let mut gpu_rows = vec![gpu_row(&result.gpu_config.recommended)];
    for alt in &result.gpu_config.alternatives {
        gpu_rows.push(gpu_row(alt));
    }
    println!("{}", Table::new(&gpu_rows).with(Style::rounded()).to_string());
    if result.gpu_config.multi_gpu {
        println!(
            "  Requires {}x {} ({} GB total VRAM)",
            result.gpu_config.gpu_count,
            result.gpu_config.recommended.name,
            result.gpu_config.total_vram_gb()
        );
    }
    println!(
        "  System: {} CPU cores, {} GB RAM, {} GB NVMe, {}",
        result.system.cpu.cores,
        result.system.memory.total_gb,
        result.system.storage.capacity_gb,
        result.system.cooling
    );

    // Cost comparison
    if use_color {
        println!("\n{}", "COST COMPARISON".yellow().bold());
    } else {
        println!("\nCOST COMPARISON");
    }
    let onprem = &result.onprem_tco;
    let cloud = result.cloud_tco.as_ref();
    let cost_rows = vec![
        CostRow {
            line: "CapEx".to_string(),
            onprem: fmt_usd(onprem.capex.total),
            cloud: "$0".to_string(),
        },
        CostRow {
            line: "OpEx (total)".to_string(),
            onprem: fmt_usd(onprem.opex.total),
            cloud: cloud
                .map(|c| fmt_usd(c.total_cost))
                .unwrap_or_else(|| "N/A".to_string()),
        },
        CostRow {
            line: "Monthly average".to_string(),
            onprem: fmt_usd(onprem.monthly_average),
            cloud: cloud
                .map(|c| fmt_usd(c.monthly_cost))
                .unwrap_or_else(|| "N/A".to_string()),
        },
        CostRow {
            line: "Total TCO".to_string(),
            onprem: fmt_usd(onprem.total),
            cloud: cloud
                .map(|c| fmt_usd(c.total_cost))
                .unwrap_or_else(|| "N/A".to_string()),
        },
    ];
    println!("{}", Table::new(&cost_rows).with(Style::rounded()).to_string());
    if let Some(cloud) = cloud {
        println!(
            "  Cloud pick: {} {} ({}x {}) at ${:.2}/hr",
            cloud.provider, cloud.instance_type, cloud.gpu_count, cloud.gpu_type, cloud.hourly_rate
        );
    }

    // Recommendation
    let comparison = &result.comparison;
    if use_color {
        println!(
            "\n{} {}",
            "RECOMMENDATION:".green().bold(),
            comparison.recommendation.as_str().to_uppercase().bold()
        );
    } else {
        println!(
            "\nRECOMMENDATION: {}",
            comparison.recommendation.as_str().to_uppercase()
        );
    }
    println!("  {}", comparison.reason);
    if comparison.savings > 0.0 {
        println!("  Potential savings: {}", fmt_usd(comparison.savings));
    }
    if let Some(breakeven) = comparison.breakeven_months {
        println!("  Break-even: {} months", breakeven);
    }

    if !warnings.is_empty() {
        if use_color {
            println!("\n{}", "WARNINGS".yellow().bold());
        } else {
            println!("\nWARNINGS");
        }
        for warning in warnings {
            println!("  - {}", warning);
        }
    }

    let suggestions = optimization_suggestions(result);
    if !suggestions.is_empty() {
        if use_color {
            println!("\n{}", "SUGGESTIONS".bright_blue().bold());
        } else {
            println!("\nSUGGESTIONS");
        }
        for suggestion in &suggestions {
            println!("  - {}: {}", suggestion.title, suggestion.message);
        }
    }
}

// Minimal output for quiet mode
fn print_result_quiet(result: &CalculationResult) {
    let comparison = &result.comparison;
    println!("recommendation: {}", comparison.recommendation.as_str());
    println!("required_memory_gb: {}", result.required_memory_gb);
    println!(
        "gpu: {}x {}",
        result.gpu_config.gpu_count, result.gpu_config.recommended.name
    );
    println!("onprem_total: {}", fmt_usd(comparison.onprem_total));
    match comparison.cloud_total {
        Some(total) => println!("cloud_total: {}", fmt_usd(total)),
        None => println!("cloud_total: N/A"),
    }
    if let Some(breakeven) = comparison.breakeven_months {
        println!("breakeven_months: {}", breakeven);
    }
}

fn gpu_row(gpu: &tco::catalog::GpuSpec) -> GpuRow {
    GpuRow {
        name: gpu.name.clone(),
        vram: format!("{} GB", gpu.vram_gb),
        price: fmt_usd(gpu.price_usd),
        power: format!("{}W", gpu.power_watts),
        price_per_gb: fmt_usd(gpu.price_per_gb()),
    }
}

fn save_result_json(
    result: &CalculationResult,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}
