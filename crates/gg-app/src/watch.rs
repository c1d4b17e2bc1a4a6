use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use gg_core::config::ConversionSettings;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::output;
use crate::pipeline::{self, Source, Target};
use crate::session::Session;

/// Surveille `path` et envoie une nouvelle génération à chaque modification.
///
/// Retourne le Watcher (doit rester vivant tant que la surveillance dure).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_input_watcher(
    path: &Path,
    session: &Arc<Session>,
    tx: flume::Sender<u64>,
) -> Result<impl Watcher + use<>> {
    let session = Arc::clone(session);
    let shown = path.display().to_string();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
            let generation = session.bump();
            log::debug!("Modification de {shown} (génération {generation})");
            // Le récepteur disparaît seulement à la fin de la surveillance.
            let _ = tx.send(generation);
        }
        Ok(_) => {}
        Err(e) => log::warn!("Erreur de surveillance : {e}"),
    })?;

    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Newest generation among `first` and everything already queued.
pub fn coalesce(first: u64, rx: &flume::Receiver<u64>) -> u64 {
    rx.try_iter().fold(first, u64::max)
}

/// Convert once, then again after every change of the source file.
///
/// Conversion errors are logged and the previous output stays on disk.
/// Returns when the watcher stops sending events.
///
/// # Errors
/// Returns an error if the watcher cannot be started.
pub fn run_watch(
    source: &Source,
    settings: &ConversionSettings,
    target: Target,
    dest: &Path,
) -> Result<()> {
    let session = Arc::new(Session::new());
    let (tx, rx) = flume::unbounded();
    let _watcher = spawn_input_watcher(source.path(), &session, tx)?;
    log::info!("Surveillance de {} (Ctrl+C pour quitter)", source.path().display());

    let mut generation = session.bump();
    loop {
        convert_and_publish(source, settings, target, &session, generation, dest);
        match rx.recv() {
            Ok(next) => generation = coalesce(next, &rx),
            Err(_) => return Ok(()),
        }
    }
}

fn convert_and_publish(
    source: &Source,
    settings: &ConversionSettings,
    target: Target,
    session: &Session,
    generation: u64,
    dest: &Path,
) {
    let text = match pipeline::convert(source, settings, target) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Conversion échouée (génération {generation}) : {e:#}");
            return;
        }
    };
    if !session.publish(generation, text) {
        log::debug!("Résultat périmé ignoré (génération {generation})");
        return;
    }
    if let Some(rendered) = session.latest() {
        match output::write_output(Some(dest), &rendered.text) {
            Ok(path) => log::info!("Écrit {}", path.display()),
            Err(e) => log::warn!("Écriture échouée : {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesce_keeps_newest_queued_generation() {
        let (tx, rx) = flume::unbounded();
        for g in [3, 5, 4] {
            tx.send(g).unwrap();
        }
        assert_eq!(coalesce(2, &rx), 5);
        assert!(rx.is_empty());
        assert_eq!(coalesce(7, &rx), 7);
    }

    #[test]
    fn failed_conversion_leaves_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.asm");
        std::fs::write(&dest, "previous").unwrap();
        let csv = dir.path().join("in.csv");
        std::fs::write(&csv, "\n").unwrap();

        let session = Session::new();
        let g = session.bump();
        convert_and_publish(
            &Source::Csv(csv),
            &ConversionSettings::default(),
            Target::Asm,
            &session,
            g,
            &dest,
        );
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous");
        assert!(session.latest().is_none());
    }

    #[test]
    fn stale_generation_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.asm");
        let csv = dir.path().join("in.csv");
        std::fs::write(&csv, "█\n").unwrap();
        let source = Source::Csv(csv);
        let settings = ConversionSettings::default();

        let session = Session::new();
        let old = session.bump();
        let new = session.bump();
        convert_and_publish(&source, &settings, Target::Asm, &session, old, &dest);
        assert!(!dest.exists());
        convert_and_publish(&source, &settings, Target::Asm, &session, new, &dest);
        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.contains("    MOV DL, 32\n"));
        assert_eq!(session.latest().map(|r| r.generation), Some(new));
    }
}
