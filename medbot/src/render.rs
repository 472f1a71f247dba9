//! User-facing texts and reply builders.

use medbot_core::{Reply, SelectOption};
use medicine_storage::MedicineRecord;
use teloxide::utils::markdown::{bold, escape};

use crate::flow::{SearchOutcome, SelectionOutcome, SelectionToken};

pub const WELCOME_TEXT: &str = "Добро пожаловать! Этот бот помогает найти информацию о лекарствах. \
Вы можете узнать название, код АТХ, состав, применение у детей и при беременности. \
Просто введите название лекарства для поиска.";
pub const ENTER_NAME_PROMPT: &str = "Введите название лекарства:";
pub const NOT_FOUND_TEXT: &str = "Лекарство не найдено. Введите название другого лекарства:";
pub const CHOOSE_TEXT: &str = "Выберите лекарство:";
pub const DETAIL_ERROR_TEXT: &str = "Ошибка получения данных. Введите название другого лекарства:";
pub const NEXT_SEARCH_PROMPT: &str = "Введите название другого лекарства для поиска:";
/// Shown in place of an absent optional field.
pub const PLACEHOLDER: &str = "Не указано";

pub fn welcome_reply() -> Reply {
    Reply::plain(format!("{}\n\n{}", WELCOME_TEXT, ENTER_NAME_PROMPT))
}

pub fn too_many_text(count: usize) -> String {
    format!("Найдено слишком много лекарств ({}). Уточните название:", count)
}

/// One button per candidate, in list order, for the keyboard of search `generation`.
pub fn candidate_options(names: &[String], generation: u64) -> Vec<SelectOption> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| SelectOption {
            label: name.clone(),
            token: SelectionToken::for_candidate(generation, index, name),
        })
        .collect()
}

pub fn search_reply(outcome: &SearchOutcome) -> Reply {
    match outcome {
        SearchOutcome::Reprompt => Reply::plain(ENTER_NAME_PROMPT),
        SearchOutcome::Candidates { names, generation } => {
            Reply::plain(CHOOSE_TEXT).with_options(candidate_options(names, *generation))
        }
        SearchOutcome::NoMatches | SearchOutcome::StoreUnavailable(_) => {
            Reply::plain(NOT_FOUND_TEXT)
        }
        SearchOutcome::TooManyMatches { count, .. } => Reply::plain(too_many_text(*count)),
    }
}

pub fn selection_reply(outcome: &SelectionOutcome) -> Reply {
    match outcome {
        SelectionOutcome::Detail(record) => Reply::markdown(detail_markdown(record)),
        SelectionOutcome::DetailUnavailable(_) | SelectionOutcome::InvalidSelection(_) => {
            Reply::plain(DETAIL_ERROR_TEXT)
        }
    }
}

fn field(label: &str, value: Option<&str>) -> String {
    let value = value.filter(|v| !v.trim().is_empty()).unwrap_or(PLACEHOLDER);
    format!("{} {}", bold(&escape(&format!("{}:", label))), escape(value))
}

/// MarkdownV2 detail block followed by the next-search prompt. Empty or whitespace-only optional
/// fields show [`PLACEHOLDER`].
pub fn detail_markdown(record: &MedicineRecord) -> String {
    let lines = [
        field("Название", Some(record.name.as_str())),
        field("Код АТХ", record.atc_code.as_deref()),
        field("Применение у детей", record.application_in_children.as_deref()),
        field(
            "Применение при беременности и лактации",
            record.pregnancy_and_lactation.as_deref(),
        ),
        field("Состав", record.composition.as_deref()),
    ];
    format!("{}\n\n{}", lines.join("\n"), escape(NEXT_SEARCH_PROMPT))
}
