pub mod compose_area;
pub mod composer;

pub use compose_area::{upload_for_submit, ComposeArea};
pub use composer::{compose, should_submit, ComposeError, ComposedMessage};

use crate::usecases::common::UseCaseMetadata;

pub struct ComposeMessage;

impl UseCaseMetadata for ComposeMessage {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "compose_message"
    }

    fn display_name() -> &'static str {
        "Формирование сообщения"
    }

    fn description() -> &'static str {
        "Сборка исходящего сообщения из текста и успешно загруженных вложений"
    }
}
