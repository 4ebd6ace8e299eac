use std::sync::Arc;

use anyhow::Result;
use converter_core::{
    ConverterBuilder, ConverterController, MemoryPreferences, PreferenceStore, ShortUuidEncoder,
    TokioHideScheduler,
};
use eframe::egui;
use shared::domain::{Field, MessageKind};
use storage::FilePreferences;
use tokio::runtime::Runtime;
use tracing::warn;

use crate::{
    config::Settings,
    controller::{events::UiAction, orchestration::dispatch_ui_action},
    presenter::{ArboardClipboard, EguiPresenter, ViewState},
};

const INVALID_FILL: egui::Color32 = egui::Color32::from_rgb(0xff, 0xeb, 0xee);
const INVALID_STROKE: egui::Color32 = egui::Color32::from_rgb(0xe5, 0x39, 0x35);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(0xc6, 0x28, 0x28);
const INFO_TEXT: egui::Color32 = egui::Color32::from_rgb(0x15, 0x65, 0xc0);

/// Values passed on the command line that seed the first conversion.
#[derive(Debug, Clone, Default)]
pub struct StartupSeed {
    pub short: Option<String>,
    pub long: Option<String>,
}

pub struct ConverterApp {
    controller: ConverterController,
    presenter: Arc<EguiPresenter>,
    // Owns the worker that runs message hide timers.
    _runtime: Runtime,
}

impl ConverterApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        seed: StartupSeed,
        runtime: Runtime,
    ) -> Result<Self> {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let presenter = Arc::new(EguiPresenter::new(cc.egui_ctx.clone()));
        let preferences_path = settings.preferences_path();
        let preferences: Arc<dyn PreferenceStore> = match FilePreferences::open(&preferences_path)
        {
            Ok(store) => Arc::new(store),
            Err(err) => {
                warn!(
                    error = %err,
                    path = %preferences_path.display(),
                    "preferences unavailable; mode will not persist"
                );
                Arc::new(MemoryPreferences::default())
            }
        };

        let mut builder = ConverterBuilder::new()
            .encoder(Arc::new(ShortUuidEncoder::default()))
            .presenter(presenter.clone())
            .preferences(preferences)
            .scheduler(Arc::new(TokioHideScheduler::new(runtime.handle().clone())))
            .clipboard(Arc::new(ArboardClipboard))
            .hide_delay(settings.hide_delay());
        if let Some(short) = seed.short {
            builder = builder.seed_short(short);
        }
        if let Some(long) = seed.long {
            builder = builder.seed_long(long);
        }

        let controller = builder.build()?;
        Ok(Self {
            controller,
            presenter,
            _runtime: runtime,
        })
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.presenter.view();
        let legacy = self.controller.legacy();

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            actions = draw_converter(ui, &view, legacy);
        });

        for action in actions {
            dispatch_ui_action(&mut self.controller, action);
        }
    }
}

fn draw_converter(ui: &mut egui::Ui, view: &ViewState, legacy: bool) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.heading("ShortUUID Converter");
    ui.add_space(12.0);

    ui.add_enabled_ui(!view.busy, |ui| {
        let mut short = view.short_text.clone();
        if field_row(ui, Field::Short, &mut short, view.short_invalid).changed() {
            actions.push(UiAction::ShortEdited(short));
        }
        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                actions.push(UiAction::GenerateShort);
            }
            if ui.button("Copy").clicked() {
                actions.push(UiAction::Copy(Field::Short));
            }
        });
        ui.add_space(12.0);

        let mut long = view.long_text.clone();
        if field_row(ui, Field::Long, &mut long, view.long_invalid).changed() {
            actions.push(UiAction::LongEdited(long));
        }
        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                actions.push(UiAction::GenerateLong);
            }
            if ui.button("Copy").clicked() {
                actions.push(UiAction::Copy(Field::Long));
            }
        });
        ui.add_space(12.0);

        let mut legacy_checked = legacy;
        if ui
            .checkbox(&mut legacy_checked, "Legacy format (< 1.0.0)")
            .changed()
        {
            actions.push(UiAction::LegacyToggled(legacy_checked));
        }
        if ui.button("Clear all").clicked() {
            actions.push(UiAction::Clear);
        }
    });

    if let Some((kind, text)) = &view.message {
        ui.add_space(12.0);
        let color = match kind {
            MessageKind::Error => ERROR_TEXT,
            MessageKind::Info => INFO_TEXT,
        };
        ui.colored_label(color, text);
    }

    actions
}

fn field_row(ui: &mut egui::Ui, field: Field, value: &mut String, invalid: bool) -> egui::Response {
    ui.label(egui::RichText::new(field.label()).strong());
    ui.scope(|ui| {
        if invalid {
            let visuals = ui.visuals_mut();
            visuals.extreme_bg_color = INVALID_FILL;
            visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, INVALID_STROKE);
        }
        ui.add(
            egui::TextEdit::singleline(value)
                .id_salt(field.label())
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY),
        )
    })
    .inner
}
