use std::collections::HashMap;

/// Hebrew shopping terms with their approved English renderings
pub struct HebrewLexicon {
    entries: HashMap<String, String>,
}

impl HebrewLexicon {
    /// Create empty lexicon
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create with the embedded product-category vocabulary
    pub fn with_defaults() -> Self {
        // Multi-word phrases first, then single words
        let builtin = [
            ("חולצה אדומה", "red shirt"),
            ("אוזניות אלחוטיות", "wireless headphones"),
            ("חולצת טריקו", "t-shirt"),
            ("נעלי ספורט", "sneakers"),
            ("שעון חכם", "smartwatch"),
            ("תיק גב", "backpack"),
            ("טייץ", "leggings"), ("טייצים", "leggings"),
            ("חולצה", "shirt"), ("חולצות", "shirts"), ("חולצת", "shirt"),
            ("שמלה", "dress"), ("שמלות", "dresses"),
            ("מכנסיים", "pants"), ("מכנס", "pants"),
            ("גינס", "jeans"),
            ("נעליים", "shoes"), ("נעל", "shoe"),
            ("ספורט", "sport"),
            ("סניקרס", "sneakers"),
            ("מגפיים", "boots"), ("מגף", "boot"),
            ("אוזניות", "headphones"),
            ("אלחוטיות", "wireless"), ("אלחוטי", "wireless"),
            ("רחפן", "drone"),
            ("שעון", "watch"),
            ("חכם", "smart"), ("חכמה", "smart"),
            ("תיק", "bag"), ("תיקים", "bags"),
            ("גב", "back"),
            ("ארנק", "wallet"),
            ("אדום", "red"), ("אדומה", "red"),
            ("כחול", "blue"), ("כחולה", "blue"),
            ("ירוק", "green"), ("ירוקה", "green"),
            ("שחור", "black"), ("שחורה", "black"),
            ("לבן", "white"), ("לבנה", "white"),
            ("ורוד", "pink"), ("ורודה", "pink"),
            ("צהוב", "yellow"), ("צהובה", "yellow"),
            ("גברים", "men"), ("לגבר", "men"),
            ("נשים", "women"), ("לאישה", "women"),
            ("ילדים", "kids"), ("ילד", "boy"), ("ילדה", "girl"),
        ];

        let mut lexicon = Self::new();
        for (hebrew, english) in builtin {
            lexicon.insert(hebrew, english);
        }
        lexicon
    }

    /// Load extra entries from a TSV file (hebrew\tenglish format), on top of the defaults
    pub fn load_from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let mut lexicon = Self::with_defaults();
        let before = lexicon.len();

        for line in content.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let mut parts = line.split('\t');
            if let (Some(hebrew), Some(english)) = (parts.next(), parts.next()) {
                if !hebrew.trim().is_empty() && !english.trim().is_empty() {
                    lexicon.insert(hebrew, english.trim());
                }
            }
        }

        tracing::info!(
            "Loaded lexicon from {path}: {} entries ({} from file)",
            lexicon.len(),
            lexicon.len().saturating_sub(before)
        );
        Ok(lexicon)
    }

    pub fn insert(&mut self, hebrew: &str, english: &str) {
        self.entries.insert(normalize(hebrew), english.to_string());
    }

    /// Look up a phrase or single word
    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(&normalize(text)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HebrewLexicon {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Whether the text contains any character from the Hebrew block
pub fn is_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// Niqqud and cantillation marks
fn is_point(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}'..='\u{05C2}' | '\u{05C4}'..='\u{05C5}' | '\u{05C7}')
}

/// Lookup key: pointing removed, lowercased, whitespace collapsed
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !is_point(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_lookup() {
        let lexicon = HebrewLexicon::with_defaults();
        assert_eq!(lexicon.get("חולצה אדומה"), Some("red shirt"));
        assert_eq!(lexicon.get("  חולצה   אדומה "), Some("red shirt"));
        assert_eq!(lexicon.get("שעון חכם"), Some("smartwatch"));
    }

    #[test]
    fn pointed_text_matches_plain_entry() {
        let lexicon = HebrewLexicon::with_defaults();
        // שִׂמְלָה
        assert_eq!(lexicon.get("\u{05E9}\u{05C2}\u{05B4}\u{05DE}\u{05B0}\u{05DC}\u{05B8}\u{05D4}"), Some("dress"));
    }

    #[test]
    fn unknown_word_misses() {
        let lexicon = HebrewLexicon::with_defaults();
        assert_eq!(lexicon.get("מחשב"), None);
        assert_eq!(lexicon.get("shoes"), None);
    }

    #[test]
    fn hebrew_detection() {
        assert!(is_hebrew("נעליים"));
        assert!(is_hebrew("nike נעליים"));
        assert!(!is_hebrew("running shoes"));
        assert!(!is_hebrew(""));
    }

    #[test]
    fn load_from_file_adds_entries() {
        let path = std::env::temp_dir().join(format!("aliscout-lexicon-{}.tsv", std::process::id()));
        std::fs::write(&path, "# extra\nמחשב\tcomputer\nשבור\n").unwrap();

        let lexicon = HebrewLexicon::load_from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lexicon.get("מחשב"), Some("computer"));
        assert_eq!(lexicon.get("שבור"), None);
        assert_eq!(lexicon.get("שמלה"), Some("dress"));
        assert_eq!(lexicon.len(), HebrewLexicon::with_defaults().len() + 1);
    }
}
