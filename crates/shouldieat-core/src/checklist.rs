//! The staff-facing checklist shown before a card is confirmed.
//!
//! The user hands their device to restaurant staff, who tick the allergens the
//! dish actually contains. The ticked set is then applied to the card with
//! [`AllergyCard::confirm_subset`].
//!
//! Translation is performed by an external engine. This module produces the
//! requests to send it (keyed by client id), assembles the responses into a
//! [`ChecklistTranslation`], and renders text with a per-string fallback to
//! the English original.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator as _};

use crate::card::AllergyCard;

pub const GREETING: &str =
  "Hi, I have some food allergies. Could you help me check a few ingredients?";
pub const QUESTION: &str = "Does this dish contain any of the following?";
pub const CONFIRM_LABEL: &str = "Confirmed";

const GREETING_ID: &str = "message1";
const QUESTION_ID: &str = "message2";
const CONFIRM_ID: &str = "button";
const ALLERGEN_ID_PREFIX: &str = "allergen_";

// ─── Languages ───────────────────────────────────────────────────────────────

/// A language the checklist can be translated into.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum StaffLanguage {
  #[strum(serialize = "English")]
  English,
  #[strum(serialize = "한국어")]
  Korean,
  #[strum(serialize = "Español")]
  Spanish,
  #[strum(serialize = "Français")]
  French,
  #[strum(serialize = "Deutsch")]
  German,
  #[strum(serialize = "Italiano")]
  Italian,
  #[strum(serialize = "日本語")]
  Japanese,
  #[strum(serialize = "中文")]
  Chinese,
  #[strum(serialize = "Português")]
  Portuguese,
  #[strum(serialize = "Русский")]
  Russian,
}

impl StaffLanguage {
  /// BCP-47 code handed to the translation engine.
  pub fn code(self) -> &'static str {
    match self {
      Self::English => "en",
      Self::Korean => "ko",
      Self::Spanish => "es",
      Self::French => "fr",
      Self::German => "de",
      Self::Italian => "it",
      Self::Japanese => "ja",
      Self::Chinese => "zh",
      Self::Portuguese => "pt",
      Self::Russian => "ru",
    }
  }

  /// Look up a language by its native display name, e.g. `"日本語"`.
  pub fn from_native_name(name: &str) -> Option<Self> {
    Self::iter().find(|l| l.to_string() == name)
  }

  pub fn from_code(code: &str) -> Option<Self> {
    Self::iter().find(|l| l.code().eq_ignore_ascii_case(code))
  }
}

// ─── Translation ─────────────────────────────────────────────────────────────

/// One string to translate, tagged so the response can be routed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
  pub client_id:   String,
  pub source_text: String,
}

/// Translated strings for one checklist. Any string may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTranslation {
  pub language:  StaffLanguage,
  pub greeting:  Option<String>,
  pub question:  Option<String>,
  pub confirm:   Option<String>,
  /// Keyed by the original (English) allergen label.
  pub allergens: HashMap<String, String>,
}

impl ChecklistTranslation {
  /// Route `(client_id, target_text)` responses back to their slots. Unknown
  /// client ids are ignored.
  pub fn from_responses<I, K, V>(language: StaffLanguage, responses: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut translation = Self {
      language,
      greeting: None,
      question: None,
      confirm: None,
      allergens: HashMap::new(),
    };
    for (id, text) in responses {
      let text = text.into();
      match id.as_ref() {
        GREETING_ID => translation.greeting = Some(text),
        QUESTION_ID => translation.question = Some(text),
        CONFIRM_ID => translation.confirm = Some(text),
        other => {
          if let Some(label) = other.strip_prefix(ALLERGEN_ID_PREFIX) {
            translation.allergens.insert(label.to_owned(), text);
          }
        }
      }
    }
    translation
  }
}

// ─── Checklist ───────────────────────────────────────────────────────────────

/// One tickable allergen row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRow {
  pub label:    String,
  pub selected: bool,
}

/// Display text for a checklist, in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChecklist {
  pub language: StaffLanguage,
  pub greeting: String,
  pub question: String,
  pub confirm:  String,
  pub rows:     Vec<RenderedRow>,
}

/// A row's original label alongside the text to display for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRow {
  pub label:    String,
  pub text:     String,
  pub selected: bool,
}

/// The staff checklist for one card. Rows start unselected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffChecklist {
  pub rows: Vec<ChecklistRow>,
}

impl StaffChecklist {
  pub fn from_card(card: &AllergyCard) -> Self {
    let rows = card
      .labels()
      .map(|label| ChecklistRow { label: label.to_owned(), selected: false })
      .collect();
    Self { rows }
  }

  /// Flip every row labelled `label`. Returns `false` if there is none.
  pub fn toggle(&mut self, label: &str) -> bool {
    let mut found = false;
    for row in self.rows.iter_mut().filter(|r| r.label == label) {
      row.selected = !row.selected;
      found = true;
    }
    found
  }

  pub fn selected_labels(&self) -> HashSet<String> {
    self
      .rows
      .iter()
      .filter(|r| r.selected)
      .map(|r| r.label.clone())
      .collect()
  }

  /// Apply the current selection to `card`.
  pub fn confirm(&self, card: &AllergyCard) -> AllergyCard {
    card.confirm_subset(&self.selected_labels())
  }

  /// Strings to send to the translation engine. Each distinct allergen label
  /// is requested once.
  pub fn translation_requests(&self) -> Vec<TranslationRequest> {
    let fixed = [
      (GREETING_ID, GREETING),
      (QUESTION_ID, QUESTION),
      (CONFIRM_ID, CONFIRM_LABEL),
    ]
    .into_iter()
    .map(|(id, text)| TranslationRequest {
      client_id:   id.to_owned(),
      source_text: text.to_owned(),
    });

    let labels: BTreeSet<&str> =
      self.rows.iter().map(|r| r.label.as_str()).collect();
    let allergens = labels.into_iter().map(|label| TranslationRequest {
      client_id:   format!("{ALLERGEN_ID_PREFIX}{label}"),
      source_text: label.to_owned(),
    });

    fixed.chain(allergens).collect()
  }

  /// Produce display text, falling back to English for every string the
  /// translation lacks or left empty.
  pub fn render(
    &self,
    translation: Option<&ChecklistTranslation>,
  ) -> RenderedChecklist {
    fn pick(translated: Option<&String>, original: &str) -> String {
      match translated {
        Some(t) if !t.is_empty() => t.clone(),
        _ => original.to_owned(),
      }
    }

    let rows = self
      .rows
      .iter()
      .map(|row| RenderedRow {
        label:    row.label.clone(),
        text:     pick(
          translation.and_then(|t| t.allergens.get(&row.label)),
          &row.label,
        ),
        selected: row.selected,
      })
      .collect();

    RenderedChecklist {
      language: translation.map_or(StaffLanguage::English, |t| t.language),
      greeting: pick(translation.and_then(|t| t.greeting.as_ref()), GREETING),
      question: pick(translation.and_then(|t| t.question.as_ref()), QUESTION),
      confirm:  pick(
        translation.and_then(|t| t.confirm.as_ref()),
        CONFIRM_LABEL,
      ),
      rows,
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;
  use crate::matcher::ContainAllergen;

  fn card() -> AllergyCard {
    AllergyCard::build(
      "Bibimbap",
      "Seoul",
      vec![
        ContainAllergen::new("Soybean"),
        ContainAllergen::new("Sesame"),
        ContainAllergen::new("Milk"),
      ],
    )
  }

  #[test]
  fn rows_start_unselected_and_confirm_keeps_ticked() {
    let card = card();
    let mut checklist = StaffChecklist::from_card(&card);
    assert!(checklist.rows.iter().all(|r| !r.selected));
    assert!(checklist.selected_labels().is_empty());

    assert!(checklist.toggle("Sesame"));
    assert!(checklist.toggle("Milk"));
    assert!(checklist.toggle("Milk"));
    assert!(!checklist.toggle("Peanut"));

    let confirmed = checklist.confirm(&card);
    assert_eq!(confirmed.labels().collect::<Vec<_>>(), ["Sesame"]);
    assert!(confirmed.is_confirmed());
  }

  #[test]
  fn untouched_checklist_confirms_safe() {
    let card = card();
    let confirmed = StaffChecklist::from_card(&card).confirm(&card);
    assert!(confirmed.contained_allergens.is_empty());
  }

  #[test]
  fn requests_cover_fixed_text_and_each_label() {
    let requests = StaffChecklist::from_card(&card()).translation_requests();
    let ids: Vec<_> = requests.iter().map(|r| r.client_id.as_str()).collect();
    assert_eq!(
      ids,
      [
        "message1",
        "message2",
        "button",
        "allergen_Milk",
        "allergen_Sesame",
        "allergen_Soybean",
      ]
    );
    assert_eq!(requests[0].source_text, GREETING);
  }

  #[test]
  fn responses_route_back_and_render_with_fallback() {
    let checklist = StaffChecklist::from_card(&card());
    let translation = ChecklistTranslation::from_responses(
      StaffLanguage::Korean,
      [
        ("message2", "이 요리에 다음 재료가 들어 있나요?"),
        ("button", ""),
        ("allergen_Sesame", "참깨"),
        ("something_else", "ignored"),
      ],
    );

    let rendered = checklist.render(Some(&translation));
    assert_eq!(rendered.language, StaffLanguage::Korean);
    assert_eq!(rendered.greeting, GREETING);
    assert_eq!(rendered.question, "이 요리에 다음 재료가 들어 있나요?");
    assert_eq!(rendered.confirm, CONFIRM_LABEL);
    assert_eq!(rendered.rows[1].text, "참깨");
    assert_eq!(rendered.rows[1].label, "Sesame");
    assert_eq!(rendered.rows[0].text, "Soybean");
  }

  #[test]
  fn untranslated_render_is_english() {
    let rendered = StaffChecklist::from_card(&card()).render(None);
    assert_eq!(rendered.language, StaffLanguage::English);
    assert_eq!(rendered.question, QUESTION);
  }

  #[test]
  fn languages_resolve_by_native_name_and_code() {
    assert_eq!(
      StaffLanguage::from_native_name("日本語"),
      Some(StaffLanguage::Japanese)
    );
    assert_eq!(StaffLanguage::from_code("PT"), Some(StaffLanguage::Portuguese));
    assert_eq!(StaffLanguage::Russian.code(), "ru");
    assert!(StaffLanguage::from_native_name("Klingon").is_none());
    assert_eq!(StaffLanguage::iter().count(), 10);
  }
}
