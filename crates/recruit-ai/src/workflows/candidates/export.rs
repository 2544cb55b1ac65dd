use std::io::Write;

use serde::Serialize;

use super::domain::Candidate;

#[derive(Serialize)]
struct CandidateRow<'a> {
    id: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    position: &'a str,
    status: &'static str,
    score: Option<u8>,
    skills: String,
    applied_date: String,
}

impl<'a> From<&'a Candidate> for CandidateRow<'a> {
    fn from(candidate: &'a Candidate) -> Self {
        Self {
            id: candidate.id.as_str(),
            name: &candidate.name,
            email: &candidate.email,
            phone: candidate.phone.as_deref().unwrap_or(""),
            position: &candidate.position,
            status: candidate.status.label(),
            score: candidate.score,
            skills: candidate
                .skills
                .as_ref()
                .map(|skills| skills.join("; "))
                .unwrap_or_default(),
            applied_date: candidate.applied_date.to_rfc3339(),
        }
    }
}

/// Write a pipeline spreadsheet (one header row, one row per candidate).
pub fn write_csv<W: Write>(candidates: &[Candidate], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for candidate in candidates {
        csv_writer.serialize(CandidateRow::from(candidate))?;
    }
    csv_writer.flush()?;
    Ok(())
}
