use clap::{Parser, Subcommand};
use spoa_core::{CoreConfig, DenunciaStore, OffenseCatalog};

#[derive(Parser)]
#[command(name = "spoa")]
#[command(about = "SPOA denuncia intake system CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered denuncias
    List,
    /// List the offense types available in the reference catalog
    Delitos,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = CoreConfig::from_env_values(
        std::env::var("SPOA_DATA_PATH").ok(),
        std::env::var("SPOA_DENUNCIAS_PATH").ok(),
    )?;

    match cli.command {
        Some(Commands::List) => {
            let store = DenunciaStore::new(config.denuncias_path().to_path_buf());
            match store.read_all() {
                Ok(denuncias) => {
                    if denuncias.is_empty() {
                        println!("No hay denuncias registradas.");
                    } else {
                        for denuncia in denuncias {
                            println!(
                                "{} | {} ({}) | agresores: {} | asistencia: {} | {} | {}",
                                denuncia.fecha_denuncia,
                                denuncia.ciudad,
                                denuncia.localidad,
                                denuncia.cantidad_agresores,
                                denuncia.asistencia_policial,
                                denuncia.delitos,
                                denuncia.tipo_arma,
                            );
                        }
                    }
                }
                Err(e) => eprintln!("Error reading denuncia log: {}", e),
            }
        }
        Some(Commands::Delitos) => match OffenseCatalog::load(config.data_path()) {
            Ok(catalog) => {
                for tipo in catalog.distinct_offense_types() {
                    println!("{}", tipo);
                }
            }
            Err(e) => eprintln!("Error loading offense catalog: {}", e),
        },
        None => {
            println!("Use 'spoa --help' for commands");
        }
    }

    Ok(())
}
