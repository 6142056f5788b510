//! Canonical display identifiers. Pure functions: each is rendered exactly
//! once at the owning entity's first persistence and never recomputed, even
//! when the customer later renames.

/// `CALL_OUT_<sequence>_<customer>`, spaces in the customer name replaced by
/// underscores; `UNKNOWN` when no customer is set yet.
pub fn callout(sequence: u32, customer: Option<&str>) -> String {
    match customer.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("CALL_OUT_{sequence}_{}", name.replace(' ', "_")),
        None => format!("CALL_OUT_{sequence}_UNKNOWN"),
    }
}

/// `SRO-<CUSTOMER>-<sequence>`, customer name upper-cased with spaces
/// removed; `GEN` when no customer is set.
pub fn sro(sequence: u32, customer: Option<&str>) -> String {
    let code = customer
        .map(|name| name.to_uppercase().replace(' ', ""))
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| "GEN".to_owned());
    format!("SRO-{code}-{sequence}")
}

/// `SCHDL_<sequence>`.
pub fn schedule(sequence: u32) -> String {
    format!("SCHDL_{sequence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callout_replaces_spaces() {
        assert_eq!(
            callout(1101, Some("Petroleum Development Oman")),
            "CALL_OUT_1101_Petroleum_Development_Oman"
        );
        assert_eq!(callout(1101, None), "CALL_OUT_1101_UNKNOWN");
        assert_eq!(callout(1101, Some("  ")), "CALL_OUT_1101_UNKNOWN");
    }

    #[test]
    fn sro_compacts_and_uppercases() {
        assert_eq!(
            sro(1101, Some("Petroleum Development Oman")),
            "SRO-PETROLEUMDEVELOPMENTOMAN-1101"
        );
        assert_eq!(sro(1102, None), "SRO-GEN-1102");
    }

    #[test]
    fn schedule_is_sequence_only() {
        assert_eq!(schedule(1101), "SCHDL_1101");
    }
}
