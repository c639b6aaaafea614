use std::{path::Path, sync::Arc};

use {
    anyhow::{Result, bail},
    shelve_catalog::{Descriptor, HttpCatalogClient, Resolution, Resolver},
    shelve_config::ShelveConfig,
    shelve_library::{DestinationSelector, default_bridge},
};

fn resolver(config: &ShelveConfig) -> Result<Resolver> {
    let client = HttpCatalogClient::new(&config.catalog)?;
    Ok(Resolver::new(Arc::new(client)))
}

async fn resolve_or_bail(config: &ShelveConfig, url: &str) -> Result<Descriptor> {
    match resolver(config)?.resolve(url).await? {
        Resolution::Resolved(descriptor) => Ok(descriptor),
        Resolution::NotFound => bail!("nothing found at {url}"),
    }
}

pub async fn handle_resolve(url: &str) -> Result<()> {
    let config = shelve_config::discover_and_load()?;
    let descriptor = resolve_or_bail(&config, url).await?;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

pub async fn handle_place(url: &str, playlist: Option<&str>, file: Option<&Path>) -> Result<()> {
    let config = shelve_config::discover_and_load()?;
    let selector = DestinationSelector::new(default_bridge(&config.library));
    if file.is_none() && selector.needs_local_file() {
        bail!("the library only takes local files; pass --file with the downloaded track");
    }

    let descriptor = resolve_or_bail(&config, url).await?;
    let destination = match playlist {
        Some(name) => selector.get(name).await?.into_name(),
        None => match selector.select_default(&config.library) {
            Some(name) => name,
            None => bail!(
                "no playlist configured and library automation is not available on this platform"
            ),
        },
    };

    selector.place(&descriptor, file, &destination).await?;
    println!(
        "Added {} to {destination}",
        descriptor.title().unwrap_or(url)
    );
    Ok(())
}
