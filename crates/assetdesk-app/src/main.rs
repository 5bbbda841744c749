//! # AssetDesk - Asset inventory for a small organisation
//!
//! Entry point that wires the layers together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Configuration & Wiring                  │
//! │    │                                                            │
//! │    ├── Loads: InventoryConfig (--config, --data)               │
//! │    ├── Opens: InMemoryStore, snapshot-backed when configured   │
//! │    ├── Creates: one service per entity kind (usecase)          │
//! │    └── Runs: seed or report                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   assetdesk [--config FILE] [--data FILE] seed    - Load the demo inventory
//!   assetdesk [--config FILE] [--data FILE] report  - Print the inventory

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use assetdesk_adapter::InMemoryStore;
use assetdesk_domain::model::employee::EmployeeInput;
use assetdesk_domain::model::hardware_asset::HardwareAssetInput;
use assetdesk_domain::model::software_asset::SoftwareAsset;
use assetdesk_usecase::{
    AccountService, DepartmentService, EmployeeService, HardwareAssetService, InventoryConfig,
    Session, SoftwareAssetService,
};

#[derive(Parser)]
#[command(name = "assetdesk")]
#[command(about = "AssetDesk - Hardware and software inventory")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot file, overrides snapshotPath from the configuration
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the demo inventory into an empty store
    Seed,
    /// Print every department with its employees and hardware
    Report,
}

/// The services of one running instance, sharing a single store
struct Inventory {
    config: InventoryConfig,
    departments: DepartmentService<InMemoryStore>,
    employees: EmployeeService<InMemoryStore>,
    accounts: AccountService<InMemoryStore>,
    hardware: HardwareAssetService<InMemoryStore>,
    software: SoftwareAssetService<InMemoryStore>,
}

impl Inventory {
    fn open(config: InventoryConfig) -> Result<Self> {
        let store = match &config.snapshot_path {
            Some(path) => InMemoryStore::open(path)
                .with_context(|| format!("Failed to open snapshot {}", path.display()))?,
            None => InMemoryStore::new(),
        };

        Ok(Self {
            departments: DepartmentService::new(store.clone()),
            employees: EmployeeService::new(store.clone(), config.admin_policy()),
            accounts: AccountService::new(store.clone(), &config),
            hardware: HardwareAssetService::new(store.clone()),
            software: SoftwareAssetService::new(store),
            config,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => InventoryConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => InventoryConfig::default(),
    };
    if let Some(data) = cli.data {
        config.snapshot_path = Some(data);
    }

    let mut inventory = Inventory::open(config)?;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Seed => seed(&mut inventory),
        Commands::Report => report(&inventory),
    }
}

fn seed(inventory: &mut Inventory) -> Result<()> {
    if !inventory.departments.get_all()?.is_empty() {
        info!("Store already holds data, nothing to seed");
        return Ok(());
    }

    info!("Seeding demo inventory...");

    let it = inventory.departments.add("IT")?;
    let sales = inventory.departments.add("Sales")?;
    let it_id = it.id().context("department stored without id")?;
    let sales_id = sales.id().context("department stored without id")?;
    info!(admin_department = %inventory.config.admin_department_id, "departments ready");

    let ada = inventory.employees.add(&EmployeeInput {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        department_id: it_id,
    })?;
    let grace = inventory.employees.add(&EmployeeInput {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        department_id: sales_id,
    })?;
    let ada_id = ada.id().context("employee stored without id")?;
    let grace_id = grace.id().context("employee stored without id")?;

    let admin = inventory.accounts.add("ada@example.com", "change-me-now")?;
    let admin_id = admin.id().context("account stored without id")?;
    inventory.accounts.bind_employee(admin_id, ada_id)?;
    inventory.accounts.promote_to_admin(admin_id, None)?;

    let windows = SoftwareAsset::new("Windows 10", "22H2", "Microsoft")?;
    let laptop = inventory.hardware.add(
        &HardwareAssetInput {
            name: "Laptop".to_string(),
            model: "ThinkPad X1".to_string(),
            manufacturer: "Lenovo".to_string(),
            kind: "Notebook".to_string(),
            ip_address: "192.168.0.10".to_string(),
            notes: Some("Docking station in room 2".to_string()),
            employee_id: Some(ada_id),
            ..Default::default()
        },
        Some(windows.clone()),
    )?;
    let desktop = inventory.hardware.add(
        &HardwareAssetInput {
            name: "Desktop".to_string(),
            model: "OptiPlex 7010".to_string(),
            manufacturer: "Dell".to_string(),
            kind: "Workstation".to_string(),
            ip_address: "192.168.0.11".to_string(),
            employee_id: Some(grace_id),
            ..Default::default()
        },
        Some(windows),
    )?;

    info!(
        laptop_software = ?laptop.software_id(),
        desktop_software = ?desktop.software_id(),
        packages = inventory.software.get_all()?.len(),
        "Seed complete"
    );

    let mut session = Session::new();
    inventory
        .accounts
        .login(&mut session, "ada@example.com", "change-me-now")?;
    info!(admin = session.is_admin(), "Demo admin signed in");
    session.logout();

    Ok(())
}

fn report(inventory: &Inventory) -> Result<()> {
    info!("📊 Inventory");

    for department in inventory.departments.get_all()? {
        let Some(department_id) = department.id() else {
            continue;
        };
        info!("{} ({})", department.name(), department_id);

        for employee in inventory.employees.get_all_for(department_id)? {
            let Some(employee_id) = employee.id() else {
                continue;
            };
            info!("   {} <{}>", employee.full_name(), employee.email());

            for asset in inventory.hardware.get_all_for(employee_id)? {
                let software = match asset.software_id() {
                    Some(id) => {
                        let package = inventory.software.get_by_id(id)?;
                        format!("{} {}", package.name(), package.version())
                    }
                    None => "no software".to_string(),
                };
                info!(
                    "     {} {} {} [{}] {}",
                    asset.name(),
                    asset.manufacturer(),
                    asset.model(),
                    asset.ip_address(),
                    software
                );
            }
        }
    }

    let admins = inventory
        .accounts
        .get_all()?
        .into_iter()
        .filter(|account| account.is_admin())
        .count();
    info!("Accounts: {} ({} admin)", inventory.accounts.get_all()?.len(), admins);
    Ok(())
}
