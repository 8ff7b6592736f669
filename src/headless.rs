//! Runs a session without a terminal UI, streaming JSON lines.

use std::io::{self, Write};

use tracing::info;

use drunk_cats::Session;

use crate::app::to_io_error;

/// Headless run settings
#[derive(Debug, Clone, Copy)]
pub struct HeadlessConfig {
    pub ticks: u64,
    pub with_moods: bool,
}

/// Write the session config, then one snapshot per tick
pub fn run_headless<W: Write>(
    session: &mut Session,
    config: HeadlessConfig,
    out: &mut W,
) -> io::Result<()> {
    serde_json::to_writer(&mut *out, session.config())?;
    out.write_all(b"\n")?;

    for _ in 0..config.ticks {
        session.tick().map_err(to_io_error)?;
        let line = session.snapshot(config.with_moods).to_json_line()?;
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    let counts = session.counts();
    info!(
        ticks = session.tick_count(),
        calm = counts.calm,
        hisses = counts.hisses,
        wants_to_fight = counts.wants_to_fight,
        "Headless run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drunk_cats::{SimConfig, TickSnapshot};

    fn session() -> Session {
        let config = SimConfig::default()
            .with_cat_count(40)
            .with_map(100.0, 100.0)
            .with_radii(4.0, 8.0)
            .with_seed(99);
        Session::new(config).unwrap()
    }

    #[test]
    fn test_writes_config_then_ticks() {
        let mut session = session();
        let mut out = Vec::new();
        run_headless(
            &mut session,
            HeadlessConfig {
                ticks: 3,
                with_moods: false,
            },
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);

        let config: SimConfig = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(config.cat_count, 40);

        for (i, line) in lines[1..].iter().enumerate() {
            let snapshot: TickSnapshot = serde_json::from_str(line).unwrap();
            assert_eq!(snapshot.tick, i as u64 + 1);
            assert_eq!(snapshot.counts.total(), 40);
            assert!(snapshot.moods.is_none());
        }
    }

    #[test]
    fn test_moods_on_request() {
        let mut session = session();
        let mut out = Vec::new();
        run_headless(
            &mut session,
            HeadlessConfig {
                ticks: 1,
                with_moods: true,
            },
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        let snapshot: TickSnapshot = serde_json::from_str(last).unwrap();
        assert_eq!(snapshot.moods.map(|m| m.len()), Some(40));
    }
}
