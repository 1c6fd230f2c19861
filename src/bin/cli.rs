use clap::Parser;
use dungen::{DungeonParams, generate_batch, generate_dungeon};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Генератор подземелий из комнат и коридоров
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (по умолчанию — встроенные параметры)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределяет сид из конфигурации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Сколько карт сгенерировать (сиды идут подряд начиная с исходного)
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    count: u64,

    /// Вывести снимок карты в JSON на stdout
    #[arg(long)]
    json: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["dungen-cli", "--count", "0"]).is_err());
        let cli = Cli::try_parse_from(["dungen-cli", "-n", "3", "--json"]).unwrap();
        assert_eq!(cli.count, 3);
        assert_eq!(Cli::try_parse_from(["dungen-cli"]).unwrap().count, 1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "загрузка конфигурации");
            DungeonParams::from_toml_file(path)?
        }
        None => DungeonParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }

    if cli.count == 1 {
        let map = generate_dungeon(&params)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&map.snapshot())?);
        }
        return Ok(());
    }

    let seeds: Vec<u64> = (0..cli.count).map(|i| params.seed.wrapping_add(i)).collect();
    info!(count = seeds.len(), "пакетная генерация");
    let mut snapshots = Vec::with_capacity(seeds.len());
    for (seed, result) in seeds.iter().zip(generate_batch(&params, &seeds)) {
        let map = result?;
        info!(
            seed,
            rooms = map.room_count(),
            requested = map.placement().requested,
            corridors = map.corridors().len(),
            "карта готова"
        );
        snapshots.push(map.snapshot());
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    }
    Ok(())
}
