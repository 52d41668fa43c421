use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{Lap, Session, SessionInfo};
use crate::color::Color;
use crate::errors::LaptraceError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub color: Color,
}

/// One line of a session file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionRecord {
    SessionInfo(SessionInfo),
    Team(TeamRecord),
    Lap(Box<Lap>),
}

pub fn load_session_jsonl(source_file: &Path) -> Result<Session, LaptraceError> {
    if !source_file.is_file() {
        return Err(LaptraceError::InvalidSessionFile {
            path: format!("{:?}", source_file),
        });
    }

    let records = serde_jsonlines::json_lines(source_file)
        .map_err(|e| LaptraceError::SessionLoaderError { source: e })?
        .collect::<Result<Vec<SessionRecord>, std::io::Error>>()
        .map_err(|e| LaptraceError::SessionLoaderError { source: e })?;

    let mut info: Option<SessionInfo> = None;
    let mut session = Session::default();
    for record in records {
        match record {
            SessionRecord::SessionInfo(session_info) => {
                if info.is_some() {
                    warn!(
                        "{:?} contains more than one session info record, keeping the last one",
                        source_file
                    );
                }
                info = Some(session_info);
            }
            SessionRecord::Team(team) => {
                session.team_colors.insert(team.name, team.color);
            }
            SessionRecord::Lap(lap) => session.laps.push(*lap),
        }
    }

    session.info = info.ok_or_else(|| LaptraceError::MissingSessionInfo {
        path: format!("{:?}", source_file),
    })?;
    info!(
        "Loaded {:?}, {} {} {} with {} laps from {} drivers",
        source_file,
        session.info.year,
        session.info.event,
        session.info.name,
        session.laps.len(),
        session.drivers().len()
    );
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Compound, SessionProvider};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_session() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"SessionInfo":{{"name":"Qualifying","event":"Bahrain Grand Prix","year":2023}}}}"#
        )
        .unwrap();
        writeln!(file, r##"{{"Team":{{"name":"Red Bull Racing","color":"#3671C6"}}}}"##).unwrap();
        writeln!(
            file,
            r#"{{"Lap":{{"driver":"VER","team":"Red Bull Racing","lap_number":1,"lap_time":90.1,"compound":"SOFT"}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"Lap":{{"driver":"VER","team":"Red Bull Racing","lap_number":2,"lap_time":null,"compound":"SOFT"}}}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let session = load_session_jsonl(file.path()).unwrap();
        assert_eq!(session.info.name, "Qualifying");
        assert_eq!(session.laps.len(), 2);
        assert_eq!(session.laps[1].lap_time, None);
        assert_eq!(session.laps[0].compound, Compound::Soft);
        assert_eq!(
            session.team_color("Red Bull Racing").unwrap(),
            Color::rgb(0x36, 0x71, 0xc6)
        );
    }

    #[test]
    fn test_missing_file() {
        let result = load_session_jsonl(Path::new("/does/not/exist.jsonl"));
        assert!(matches!(
            result,
            Err(LaptraceError::InvalidSessionFile { .. })
        ));
    }

    #[test]
    fn test_malformed_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"Lap":{{"driver":"VER"}}}}"#).unwrap();
        file.flush().unwrap();

        let result = load_session_jsonl(file.path());
        assert!(matches!(
            result,
            Err(LaptraceError::SessionLoaderError { .. })
        ));
    }

    #[test]
    fn test_missing_session_info() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"Lap":{{"driver":"VER","team":"Red Bull Racing","lap_number":1,"compound":"HARD"}}}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let result = load_session_jsonl(file.path());
        assert!(matches!(
            result,
            Err(LaptraceError::MissingSessionInfo { .. })
        ));
    }
}
