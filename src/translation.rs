//! Localised marker phrases found in WhatsApp exports.
//!
//! WhatsApp writes a handful of fixed phrases into exported transcripts
//! ("POLL:", "OPTION:", "Event Start time", ...) in the language of the
//! exporting phone. Poll and event detection needs to look for the phrase in
//! the right language, and the renderer needs a few labels of its own.
//!
//! - [`Language`] - supported export languages
//! - [`Phrase`] - the fixed set of canonical (English) phrases
//! - [`TranslationTable`] - phrase → per-language variants, with identity fallback
//!
//! # Example
//!
//! ```rust
//! use chatpage::translation::{Language, Phrase, TranslationTable};
//!
//! let table = TranslationTable::builtin();
//! assert_eq!(table.get(Phrase::Poll, Language::It), " SONDAGGIO:\n");
//! assert_eq!(table.get(Phrase::Poll, Language::En), " POLL:\n");
//!
//! // Phrases outside the table come back unchanged
//! assert_eq!(table.translate("Hello", Language::De), "Hello");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Languages a WhatsApp export can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (canonical phrases)
    #[default]
    En,
    /// Italian
    It,
    /// Spanish
    Es,
    /// German
    De,
    /// French
    Fr,
}

impl Language {
    /// Returns the two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::It => "it",
            Language::Es => "es",
            Language::De => "de",
            Language::Fr => "fr",
        }
    }

    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[
            Language::En,
            Language::It,
            Language::Es,
            Language::De,
            Language::Fr,
        ]
    }

    /// Picks a language from a locale string such as `it_IT.UTF-8` or `de-CH`.
    ///
    /// Unknown or empty locales fall back to English.
    ///
    /// ```rust
    /// use chatpage::translation::Language;
    ///
    /// assert_eq!(Language::from_locale("it_IT.UTF-8"), Language::It);
    /// assert_eq!(Language::from_locale("pt-BR"), Language::En);
    /// ```
    pub fn from_locale(locale: &str) -> Self {
        let prefix = locale.trim().get(..2).unwrap_or_default().to_lowercase();
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.code() == prefix)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "it" | "italian" => Ok(Language::It),
            "es" | "spanish" => Ok(Language::Es),
            "de" | "german" => Ok(Language::De),
            "fr" | "french" => Ok(Language::Fr),
            _ => Err(format!(
                "Unknown language: '{}'. Expected one of: en, it, es, de, fr",
                s
            )),
        }
    }
}

/// Canonical marker phrases. The English text doubles as the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    /// Author label for messages without a sender
    Notification,
    /// Prefix of a poll body
    Poll,
    /// Separator in front of every poll option
    PollOption,
    /// Precedes the vote count unit, e.g. `(3 votes)`
    Vote,
    /// Prefix of an event body
    Event,
    /// Bare start time marker used to recognise an event
    EventStartTime,
    /// Start time field line
    EventStartTimeField,
    EventCancelled,
    EventDescription,
    EventJoinLink,
    EventLocationName,
    EventLocationPoint,
    /// Label suffix for rendered polls
    AutodetectedPoll,
    /// Label suffix for rendered events
    AutodetectedEvent,
}

impl Phrase {
    /// Returns the canonical English text of this phrase.
    pub fn canonical(self) -> &'static str {
        match self {
            Phrase::Notification => "WhatsApp Notification",
            Phrase::Poll => " POLL:\n",
            Phrase::PollOption => "\nOPTION: ",
            Phrase::Vote => " vote",
            Phrase::Event => " EVENT: ",
            Phrase::EventStartTime => "Event Start time",
            Phrase::EventStartTimeField => "\nEvent Start time: ",
            Phrase::EventCancelled => "Event Cancelled:",
            Phrase::EventDescription => "Event Description: ",
            Phrase::EventJoinLink => "Event Join Link: ",
            Phrase::EventLocationName => "Event Location Name: ",
            Phrase::EventLocationPoint => "Event Location Point: ",
            Phrase::AutodetectedPoll => "Autodetected poll",
            Phrase::AutodetectedEvent => "Autodetected event",
        }
    }

    /// Returns every phrase.
    pub fn all() -> &'static [Phrase] {
        &[
            Phrase::Notification,
            Phrase::Poll,
            Phrase::PollOption,
            Phrase::Vote,
            Phrase::Event,
            Phrase::EventStartTime,
            Phrase::EventStartTimeField,
            Phrase::EventCancelled,
            Phrase::EventDescription,
            Phrase::EventJoinLink,
            Phrase::EventLocationName,
            Phrase::EventLocationPoint,
            Phrase::AutodetectedPoll,
            Phrase::AutodetectedEvent,
        ]
    }

    /// Looks a phrase up by its canonical text.
    pub fn from_canonical(text: &str) -> Option<Phrase> {
        Phrase::all().iter().copied().find(|p| p.canonical() == text)
    }
}

/// Built-in variants, ordered it, es, de, fr.
const BUILTIN: &[(Phrase, [&str; 4])] = &[
    (
        Phrase::Notification,
        [
            "Notifiche di WhatsApp",
            "Notificación de WhatsApp",
            "WhatsApp-Benachrichtigung",
            "Notification WhatsApp",
        ],
    ),
    (
        Phrase::Poll,
        [" SONDAGGIO:\n", " ENCUESTA:\n", " UMFRAGE:\n", " SONDAGE  :\n"],
    ),
    (
        Phrase::PollOption,
        ["\nOPZIONE: ", "\nOPCIÓN: ", "\nOPTION: ", "\nOPTION  : "],
    ),
    (Phrase::Vote, [" vot", " vot", " Stimme", "vote"]),
    (
        Phrase::Event,
        [" EVENTO: ", " EVENTO: ", " EREIGNIS: ", " ÉVÉNEMENT : "],
    ),
    (
        Phrase::EventStartTime,
        [
            "Ora di inizio dell'evento",
            "Hora de inicio del evento",
            "Startzeit des Ereignisses",
            "Heure de début de l’événement : ",
        ],
    ),
    (
        Phrase::EventStartTimeField,
        [
            "\nOra di inizio dell'evento: ",
            "\nHora de inicio del evento: ",
            "\nStartzeit des Ereignisses: ",
            "\nHeure de début de l’événement : ",
        ],
    ),
    (
        Phrase::EventCancelled,
        [
            "Evento annullato:",
            "Evento cancelado:",
            "Ereignis abgesagt:",
            "Événement annulé :",
        ],
    ),
    (
        Phrase::EventDescription,
        [
            "Descrizione dell'evento: ",
            "Descripción del evento: ",
            "Beschreibung des Ereignisses: ",
            "Description de l’événement : ",
        ],
    ),
    (
        Phrase::EventJoinLink,
        [
            "Link di partecipazione all'evento: ",
            "Enlace para unirse al evento ",
            "Beitrittslink des Ereignisses: ",
            "Lien de participation à l’événement : ",
        ],
    ),
    (
        Phrase::EventLocationName,
        [
            "Nome del luogo dell'evento: ",
            "Nombre de la ubicación del evento: ",
            "Standortname des Ereignisses: ",
            "Nom du lieu de l’événement : ",
        ],
    ),
    (
        Phrase::EventLocationPoint,
        [
            "Localizzazione dell'evento: ",
            "Ubicación del evento: ",
            "Genauer Standort des Ereignisses: ",
            "Point de localisation de l’événement : ",
        ],
    ),
    (
        Phrase::AutodetectedPoll,
        [
            "Sondaggio rilevato automaticamente",
            "Encuesta detectada automáticamente",
            "Automatisch erkannte umfrage",
            "Sondage détecté automatiquement",
        ],
    ),
    (
        Phrase::AutodetectedEvent,
        [
            "Evento rilevato automaticamente",
            "Evento detectado automáticamente",
            "Automatisch erkanntes ereignis",
            "Événement détecté automatiquement",
        ],
    ),
];

static BUILTIN_TABLE: LazyLock<TranslationTable> = LazyLock::new(|| {
    let langs = [Language::It, Language::Es, Language::De, Language::Fr];
    TranslationTable::new(BUILTIN.iter().map(|(phrase, variants)| {
        let per_lang = langs
            .iter()
            .zip(variants.iter())
            .map(|(lang, text)| (*lang, (*text).to_string()))
            .collect::<HashMap<_, _>>();
        (*phrase, per_lang)
    }))
});

/// Phrase → per-language variants.
///
/// English is never stored: the canonical phrase is the English text, and
/// any missing variant falls back to it.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<Phrase, HashMap<Language, String>>,
}

impl TranslationTable {
    /// Builds a table from phrase entries.
    pub fn new(entries: impl IntoIterator<Item = (Phrase, HashMap<Language, String>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the table shipped with the crate.
    pub fn builtin() -> &'static TranslationTable {
        &BUILTIN_TABLE
    }

    /// Returns the variant of `phrase` for `language`.
    pub fn get(&self, phrase: Phrase, language: Language) -> &str {
        self.entries
            .get(&phrase)
            .and_then(|variants| variants.get(&language))
            .map_or(phrase.canonical(), String::as_str)
    }

    /// Translates a canonical phrase given as text.
    ///
    /// Text that is not a known phrase is returned unchanged.
    pub fn translate<'a>(&'a self, text: &'a str, language: Language) -> &'a str {
        match Phrase::from_canonical(text) {
            Some(phrase) => self.get(phrase, language),
            None => text,
        }
    }
}
