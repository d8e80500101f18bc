use anyhow::Result;
use wortschatz_core::{AppConfig, Identifier, Topic, TopicTable, sort_key};
use wortschatz_storage::{Storage, TranslationStore};

fn open(config: &AppConfig) -> Result<(Storage, TranslationStore)> {
    let storage = Storage::from_config(config)?;
    let translations = TranslationStore::open(&config.paths.translations)?;
    Ok((storage, translations))
}

fn labelled(translations: &TranslationStore, name: Identifier) -> Topic {
    let label = translations.label_for(name.as_str());
    Topic { name, label }
}

pub(crate) fn run_topics(config: &AppConfig) -> Result<()> {
    let (storage, translations) = open(config)?;
    let topics: Vec<Topic> =
        storage.list_topics()?.into_iter().map(|name| labelled(&translations, name)).collect();
    println!("{}", serde_json::to_string_pretty(&topics)?);
    Ok(())
}

pub(crate) fn run_show(config: &AppConfig, topic: &str) -> Result<()> {
    let name = Identifier::new(topic)?;
    let (storage, translations) = open(config)?;
    let (columns, entries) = storage.read_table(&name)?;
    let table = TopicTable { topic: labelled(&translations, name), columns, entries };
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}

pub(crate) fn run_backfill(config: &AppConfig, topic: &str) -> Result<()> {
    let name = Identifier::new(topic)?;
    let storage = Storage::from_config(config)?;
    let rows = storage.backfill_sort_values(&name)?;
    println!("Rebuilt sort values for {rows} rows of {name}");
    Ok(())
}

pub(crate) fn run_dump(config: &AppConfig, topic: Option<&str>) -> Result<()> {
    let storage = Storage::from_config(config)?;
    let dir = &config.paths.dump;
    let paths = match topic {
        Some(topic) => vec![storage.dump_table(&Identifier::new(topic)?, dir)?],
        None => storage.dump_all(dir)?,
    };
    for path in &paths {
        println!("{}", path.display());
    }
    Ok(())
}

pub(crate) fn run_sort_key(text: &str) -> Result<()> {
    println!("{}", sort_key(text));
    Ok(())
}
