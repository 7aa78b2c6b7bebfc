use chrono::{DateTime, Utc};

const FALLBACK_PATIENT: &str = "paciente";
const UNSAFE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// `cotizacion_<patient>_<unix millis>.pdf`.
///
/// Whitespace runs become a single `_`; characters file systems reject are
/// dropped.
pub fn export_file_name(patient_name: &str, exported_at: DateTime<Utc>) -> String {
    let mut patient = String::with_capacity(patient_name.len());
    let mut pending_separator = false;
    for ch in patient_name.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if ch.is_control() || UNSAFE_CHARS.contains(&ch) {
            continue;
        }
        if pending_separator && !patient.is_empty() {
            patient.push('_');
        }
        pending_separator = false;
        patient.push(ch);
    }
    if patient.is_empty() {
        patient.push_str(FALLBACK_PATIENT);
    }
    format!(
        "cotizacion_{}_{}.pdf",
        patient,
        exported_at.timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_718_000_000_123).unwrap()
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(
            export_file_name("  Ana   María\tGómez ", at()),
            "cotizacion_Ana_María_Gómez_1718000000123.pdf"
        );
    }

    #[test]
    fn test_unsafe_characters_are_dropped() {
        assert_eq!(
            export_file_name("Luis/Ortiz: \"hijo\"?", at()),
            "cotizacion_LuisOrtiz_hijo_1718000000123.pdf"
        );
    }

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(
            export_file_name(" /// ", at()),
            "cotizacion_paciente_1718000000123.pdf"
        );
    }
}
