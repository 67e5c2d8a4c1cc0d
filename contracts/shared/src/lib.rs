//! Shared data structures and validation for SkillCert contracts.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contracttype, String, Vec};

/// Maximum number of skills a credential may list.
pub const MAX_SKILLS: u32 = 20;

/// Maximum length of a single skill label. Counted in UTF-8 bytes, not
/// characters: a label of 64 ASCII characters fits, 33 two-byte characters
/// do not.
pub const MAX_SKILL_LEN: u32 = 64;

/// Maximum number of spenders that may hold an approval on one credential
/// at the same time. Burning clears every approval in the same transaction,
/// so this bounds the ledger entries a burn writes.
pub const MAX_APPROVALS: u32 = 20;

/// TTL bump applied to persistent entries on every write (~30 days).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// TTL bump applied to contract instance storage on every write (~30 days).
pub const INSTANCE_BUMP_LEDGERS: u32 = 518_400;

/// Letter grade attached to a credential. `Ungraded` is the empty label.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
    Ungraded,
}

impl Grade {
    /// Parse a grade label such as `"A+"` or `""`. Returns `None` for any
    /// label outside the permitted set.
    pub fn parse(label: &String) -> Option<Grade> {
        let len = label.len() as usize;
        if len > 2 {
            return None;
        }
        let mut buf = [0u8; 2];
        label.copy_into_slice(&mut buf[..len]);

        match &buf[..len] {
            b"A+" => Some(Grade::APlus),
            b"A" => Some(Grade::A),
            b"A-" => Some(Grade::AMinus),
            b"B+" => Some(Grade::BPlus),
            b"B" => Some(Grade::B),
            b"B-" => Some(Grade::BMinus),
            b"C+" => Some(Grade::CPlus),
            b"C" => Some(Grade::C),
            b"C-" => Some(Grade::CMinus),
            b"D" => Some(Grade::D),
            b"F" => Some(Grade::F),
            b"" => Some(Grade::Ungraded),
            _ => None,
        }
    }
}

/// Attested details of a credential.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialMetadata {
    pub skills: Vec<String>,
    pub grade: Grade,
    pub verified_at: u32, // ledger sequence of the last attestation
}

/// Returns true when the list holds at most `MAX_SKILLS` entries and no
/// entry is longer than `MAX_SKILL_LEN` bytes.
pub fn skills_within_limits(skills: &Vec<String>) -> bool {
    if skills.len() > MAX_SKILLS {
        return false;
    }
    skills.iter().all(|skill| skill.len() <= MAX_SKILL_LEN)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{vec, Env};

    #[test]
    fn test_parse_accepts_every_permitted_label() {
        let env = Env::default();
        let labels = [
            ("A+", Grade::APlus),
            ("A", Grade::A),
            ("A-", Grade::AMinus),
            ("B+", Grade::BPlus),
            ("B", Grade::B),
            ("B-", Grade::BMinus),
            ("C+", Grade::CPlus),
            ("C", Grade::C),
            ("C-", Grade::CMinus),
            ("D", Grade::D),
            ("F", Grade::F),
            ("", Grade::Ungraded),
        ];
        for (label, grade) in labels {
            assert_eq!(Grade::parse(&String::from_str(&env, label)), Some(grade));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        let env = Env::default();
        for label in ["Z", "E", "D+", "F-", "a+", "A++", "excellent"] {
            assert_eq!(Grade::parse(&String::from_str(&env, label)), None);
        }
    }

    #[test]
    fn test_skill_limits() {
        let env = Env::default();
        let empty: Vec<String> = Vec::new(&env);
        assert!(skills_within_limits(&empty));

        let mut full = Vec::new(&env);
        for _ in 0..MAX_SKILLS {
            full.push_back(String::from_str(&env, "rust"));
        }
        assert!(skills_within_limits(&full));

        full.push_back(String::from_str(&env, "one-too-many"));
        assert!(!skills_within_limits(&full));

        let at_limit = [b'x'; MAX_SKILL_LEN as usize];
        let over_limit = [b'x'; MAX_SKILL_LEN as usize + 1];
        let ok = vec![&env, String::from_bytes(&env, &at_limit)];
        let too_long = vec![&env, String::from_bytes(&env, &over_limit)];
        assert!(skills_within_limits(&ok));
        assert!(!skills_within_limits(&too_long));
    }

    #[test]
    fn test_skill_limit_counts_bytes() {
        let env = Env::default();
        // "é" is two bytes in UTF-8: 32 of them fill the limit, 33 overflow it.
        let mut thirty_two = [0u8; 64];
        let mut thirty_three = [0u8; 66];
        for pair in thirty_two.chunks_mut(2).chain(thirty_three.chunks_mut(2)) {
            pair.copy_from_slice("é".as_bytes());
        }

        let fits = vec![&env, String::from_bytes(&env, &thirty_two)];
        let too_long = vec![&env, String::from_bytes(&env, &thirty_three)];
        assert!(skills_within_limits(&fits));
        assert!(!skills_within_limits(&too_long));
    }
}
