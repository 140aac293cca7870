//! Stop words skipped by the spelling check

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Italian stop words (articles, prepositions, pronouns and auxiliary verb forms)
const ITALIAN: &[&str] = &[
    "ad", "al", "allo", "ai", "agli", "all", "agl", "alla", "alle", "con", "col", "coi", "da",
    "dal", "dallo", "dai", "dagli", "dall", "dagl", "dalla", "dalle", "di", "del", "dello", "dei",
    "degli", "dell", "degl", "della", "delle", "in", "nel", "nello", "nei", "negli", "nell",
    "negl", "nella", "nelle", "su", "sul", "sullo", "sui", "sugli", "sull", "sugl", "sulla",
    "sulle", "per", "tra", "contro", "io", "tu", "lui", "lei", "noi", "voi", "loro", "mio", "mia",
    "miei", "mie", "tuo", "tua", "tuoi", "tue", "suo", "sua", "suoi", "sue", "nostro", "nostra",
    "nostri", "nostre", "vostro", "vostra", "vostri", "vostre", "mi", "ti", "ci", "vi", "lo",
    "la", "li", "le", "gli", "ne", "il", "un", "uno", "una", "ma", "ed", "se", "perché", "anche",
    "come", "dov", "dove", "che", "chi", "cui", "non", "più", "quale", "quanto", "quanti",
    "quanta", "quante", "quello", "quelli", "quella", "quelle", "questo", "questi", "questa",
    "queste", "si", "tutto", "tutti", "a", "c", "e", "i", "l", "o", "ho", "hai", "ha", "abbiamo",
    "avete", "hanno", "abbia", "abbiate", "abbiano", "avrò", "avrai", "avrà", "avremo", "avrete",
    "avranno", "avrei", "avresti", "avrebbe", "avremmo", "avreste", "avrebbero", "avevo", "avevi",
    "aveva", "avevamo", "avevate", "avevano", "ebbi", "avesti", "ebbe", "avemmo", "aveste",
    "ebbero", "avessi", "avesse", "avessimo", "avessero", "avendo", "avuto", "avuta", "avuti",
    "avute", "sono", "sei", "è", "siamo", "siete", "sia", "siate", "siano", "sarò", "sarai",
    "sarà", "saremo", "sarete", "saranno", "sarei", "saresti", "sarebbe", "saremmo", "sareste",
    "sarebbero", "ero", "eri", "era", "eravamo", "eravate", "erano", "fui", "fosti", "fu",
    "fummo", "foste", "furono", "fossi", "fosse", "fossimo", "fossero", "essendo", "faccio",
    "fai", "facciamo", "fanno", "faccia", "facciate", "facciano", "farò", "farai", "farà",
    "faremo", "farete", "faranno", "farei", "faresti", "farebbe", "faremmo", "fareste",
    "farebbero", "facevo", "facevi", "faceva", "facevamo", "facevate", "facevano", "feci",
    "facesti", "fece", "facemmo", "faceste", "fecero", "facessi", "facesse", "facessimo",
    "facessero", "facendo", "sto", "stai", "sta", "stiamo", "stanno", "stia", "stiate", "stiano",
    "starò", "starai", "starà", "staremo", "starete", "staranno", "starei", "staresti",
    "starebbe", "staremmo", "stareste", "starebbero", "stavo", "stavi", "stava", "stavamo",
    "stavate", "stavano", "stetti", "stesti", "stette", "stemmo", "steste", "stettero", "stessi",
    "stesse", "stessimo", "stessero", "stando",
];

/// A set of lowercase stop words
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in Italian list
    pub fn italian() -> Self {
        Self::from_words(ITALIAN.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load one stop word per line; `#` starts a comment line
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop words from {:?}", path))?;
        Ok(Self::from_words(
            source.lines().filter(|l| !l.trim_start().starts_with('#')),
        ))
    }

    /// Case-insensitive membership test
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
