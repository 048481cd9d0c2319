use clap::Parser;
use failure::Error;
use log::{error, info, warn};
use std::path::Path;

use persistboot::config::BootConfig;
use persistboot::util::setup_logger;
use persistboot::{managers, BehaviourCatalog, Bootstrapper, Scene, SingletonRegistry, TemplateLibrary};

#[derive(Parser, Debug)]
#[command(name = "persistboot", about = "Bootstraps persistent objects before the first scene")]
struct Args {
    /// Boot config file
    #[arg(long, default_value = "boot.toml")]
    config: String,
    /// Overrides `boot.template`
    #[arg(long)]
    template: Option<String>,
}

fn main() -> std::result::Result<(), Error> {
    let args = Args::parse();
    let (mut config, fallback) = BootConfig::load_or_default(&args.config);
    if let Some(template) = args.template {
        config.boot.template = template;
    }
    setup_logger(&config.log)?;
    if let Some(reason) = fallback {
        warn!("using default boot config, {}: {}", args.config, reason);
    }

    let mut catalog = BehaviourCatalog::new();
    managers::register_builtin(&mut catalog);
    info!("behaviour types: {:?}", catalog.type_names());

    let mut library = TemplateLibrary::new();
    let loaded = library.load_dir(Path::new(&config.boot.template_dir), &catalog)?;
    info!("{} template(s) in {}: {:?}", loaded, config.boot.template_dir, library.names());

    let mut scene = Scene::with_registry(SingletonRegistry::global());
    let mut bootstrapper = Bootstrapper::new(library);
    let report = match bootstrapper.run(&mut scene, &config.boot.template) {
        Ok(report) => report,
        Err(e) => {
            error!("bootstrap failed: {}", e);
            return Err(e.into());
        }
    };
    for &object in &report.relocated {
        info!("persistent: {:?} `{}`", object, scene.name(object).unwrap_or_default());
    }

    if let Some(first) = &config.boot.first_scene {
        let unloaded = scene.load_scene(first);
        info!("scene `{}` loaded, {} object(s) unloaded", first, unloaded);
    }

    for (type_name, entity) in scene.registry().entries() {
        info!("singleton {} -> {:?}", type_name, entity);
    }
    Ok(())
}
