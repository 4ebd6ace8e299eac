//! Routes UI actions into the converter controller.

use converter_core::ConverterController;

use crate::controller::events::UiAction;

pub fn dispatch_ui_action(controller: &mut ConverterController, action: UiAction) {
    tracing::debug!(action = action.name(), "dispatching ui action");

    match action {
        UiAction::ShortEdited(text) => controller.on_short_form_changed(&text),
        UiAction::LongEdited(text) => controller.on_long_form_changed(&text),
        UiAction::LegacyToggled(legacy) => controller.on_mode_changed(legacy),
        UiAction::GenerateShort => {
            controller.generate_short_form();
        }
        UiAction::GenerateLong => {
            controller.generate_long_form();
        }
        UiAction::Clear => controller.clear(),
        UiAction::Copy(field) => controller.copy(field),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use converter_core::{ConverterBuilder, Presenter, ShortUuidEncoder};
    use shared::domain::{Field, MessageKind};

    use super::*;

    struct NullPresenter;

    impl Presenter for NullPresenter {
        fn set_field_text(&self, _field: Field, _text: &str) {}
        fn set_field_invalid(&self, _field: Field, _invalid: bool) {}
        fn set_busy(&self, _busy: bool) {}
        fn show_message(&self, _kind: MessageKind, _text: &str) {}
        fn hide_messages(&self) {}
    }

    fn controller() -> ConverterController {
        ConverterBuilder::new()
            .encoder(Arc::new(ShortUuidEncoder::default()))
            .presenter(Arc::new(NullPresenter))
            .seed_long("550e8400-e29b-41d4-a716-446655440000")
            .build()
            .expect("controller")
    }

    #[test]
    fn edits_and_toggles_reach_the_controller() {
        let mut controller = controller();
        assert_eq!(controller.short_form(), "H9cNmGXLEc8NWcZzSThA9S");

        dispatch_ui_action(&mut controller, UiAction::LegacyToggled(true));
        assert!(controller.legacy());

        dispatch_ui_action(
            &mut controller,
            UiAction::ShortEdited("S9AhTSzZcWN8cELXGmNc9H".into()),
        );
        assert_eq!(
            controller.long_form(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn clear_then_generate_fills_both_fields() {
        let mut controller = controller();
        dispatch_ui_action(&mut controller, UiAction::Clear);
        assert_eq!(controller.short_form(), "");
        assert_eq!(controller.long_form(), "");

        dispatch_ui_action(&mut controller, UiAction::GenerateLong);
        assert_eq!(controller.long_form().len(), 36);
        assert_eq!(controller.short_form().len(), 22);
    }
}
