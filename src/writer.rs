use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;
use log::info;

use crate::{
    LaptraceError,
    session::{
        Session,
        loader::{SessionRecord, TeamRecord},
    },
};

/// Writes a session in the JSON lines format read by `load_session_jsonl`
pub fn write_session(file: &Path, session: &Session) -> Result<(), LaptraceError> {
    let session_file = File::create(file).map_err(|e| LaptraceError::WriterError { source: e })?;
    let mut session_file_writer = BufWriter::new(session_file);

    let mut records = vec![SessionRecord::SessionInfo(session.info.clone())];
    // sorted by name so the same session always writes the same file
    records.extend(
        session
            .team_colors
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(name, color)| {
                SessionRecord::Team(TeamRecord {
                    name: name.clone(),
                    color: *color,
                })
            }),
    );
    records.extend(
        session
            .laps
            .iter()
            .map(|lap| SessionRecord::Lap(Box::new(lap.clone()))),
    );

    for record in &records {
        let line = serde_json::to_string(record)
            .map_err(|e| LaptraceError::RecordSerializeError { source: e })?;
        writeln!(session_file_writer, "{}", line)
            .map_err(|e| LaptraceError::WriterError { source: e })?;
    }
    session_file_writer
        .flush()
        .map_err(|e| LaptraceError::WriterError { source: e })?;
    info!("Wrote {} records to {:?}", records.len(), file);
    Ok(())
}
