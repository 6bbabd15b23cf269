//! DataBoard desktop app shell: the marketing pages (hero, gallery,
//! contact) and the trial flow page. Everything here is presentation; trial
//! state is owned by the backend worker and reaches us as [`UiEvent`]s.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::{ContactRequest, GalleryItem, TrialSnapshot, TrialStage};
use trial_core::TrialEvent;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub const SETTINGS_STORAGE_KEY: &str = "databoard_desktop_settings";

const GALLERY_AUTOPLAY_INTERVAL: Duration = Duration::from_secs(4);
const HERO_DESCRIPTION_INTERVAL_SECS: u64 = 4;
const CONTACT_SUCCESS_VISIBLE_FOR: Duration = Duration::from_secs(5);
const ANIMATION_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const ACCENT_PURPLE: egui::Color32 = egui::Color32::from_rgb(139, 92, 246);
const ACCENT_PINK: egui::Color32 = egui::Color32::from_rgb(236, 72, 153);
const ACCENT_GREEN: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const ACCENT_ORANGE: egui::Color32 = egui::Color32::from_rgb(249, 115, 22);

const HERO_DESCRIPTIONS: [&str; 4] = [
    "Your AI-powered data exploration assistant.",
    "Transform raw data into actionable insights.",
    "Visualize, analyze, and discover patterns instantly.",
    "Making data science accessible to everyone.",
];

const GALLERY_TINTS: [egui::Color32; 5] = [
    ACCENT_BLUE,
    ACCENT_PURPLE,
    ACCENT_PINK,
    ACCENT_GREEN,
    ACCENT_ORANGE,
];

fn showcase_items() -> Vec<GalleryItem> {
    let raw = [
        (
            "Sales Dashboard",
            "Interactive sales analytics with real-time KPIs and trend analysis",
            "Analytics",
        ),
        (
            "Customer Insights",
            "Deep dive into customer behavior patterns and segmentation",
            "Customer Data",
        ),
        (
            "Financial Reports",
            "Comprehensive financial tracking with automated reporting",
            "Finance",
        ),
        (
            "Inventory Management",
            "Smart inventory tracking with predictive restocking alerts",
            "Operations",
        ),
        (
            "Marketing Performance",
            "Campaign effectiveness analysis with ROI optimization",
            "Marketing",
        ),
    ];
    raw.iter()
        .map(|(title, description, category)| GalleryItem {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppPage {
    Home,
    Trial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomeSection {
    Header,
    Gallery,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

#[derive(Debug, Clone)]
struct GalleryUiState {
    items: Vec<GalleryItem>,
    current_index: usize,
    autoplay: bool,
    last_advance: Instant,
}

impl GalleryUiState {
    fn new() -> Self {
        Self {
            items: showcase_items(),
            current_index: 0,
            autoplay: true,
            last_advance: Instant::now(),
        }
    }

    fn current_item(&self) -> &GalleryItem {
        &self.items[self.current_index]
    }

    fn next_slide(&mut self) {
        self.current_index = (self.current_index + 1) % self.items.len();
        self.last_advance = Instant::now();
    }

    fn prev_slide(&mut self) {
        self.current_index = (self.current_index + self.items.len() - 1) % self.items.len();
        self.last_advance = Instant::now();
    }

    fn go_to_slide(&mut self, index: usize) {
        if index < self.items.len() {
            self.current_index = index;
            self.last_advance = Instant::now();
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ContactFormState {
    name: String,
    email: String,
    subject: String,
    message: String,
    name_error: Option<&'static str>,
    email_error: Option<&'static str>,
    message_error: Option<&'static str>,
    submitting: bool,
    success_until: Option<Instant>,
}

impl ContactFormState {
    fn validate(&mut self) -> bool {
        self.name_error = if self.name.trim().is_empty() {
            Some("Name is required")
        } else {
            None
        };
        self.email_error = if self.email.trim().is_empty() {
            Some("Email is required")
        } else if !self.email.contains('@') {
            Some("Please enter a valid email")
        } else {
            None
        };
        self.message_error = if self.message.trim().is_empty() {
            Some("Message is required")
        } else {
            None
        };
        self.name_error.is_none() && self.email_error.is_none() && self.message_error.is_none()
    }

    fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
        self.name_error = None;
        self.email_error = None;
        self.message_error = None;
    }

    fn success_visible(&self) -> bool {
        self.success_until
            .map(|until| Instant::now() < until)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ThemeSettings {
    accent_color: egui::Color32,
    text_scale: f32,
}

impl ThemeSettings {
    fn databoard_default() -> Self {
        Self {
            accent_color: ACCENT_BLUE,
            text_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDesktopSettings {
    accent_color: [u8; 4],
    text_scale: f32,
}

impl Default for PersistedDesktopSettings {
    fn default() -> Self {
        let theme = ThemeSettings::databoard_default();
        Self {
            accent_color: [
                theme.accent_color.r(),
                theme.accent_color.g(),
                theme.accent_color.b(),
                theme.accent_color.a(),
            ],
            text_scale: theme.text_scale,
        }
    }
}

impl PersistedDesktopSettings {
    fn into_runtime(self) -> ThemeSettings {
        ThemeSettings {
            accent_color: egui::Color32::from_rgba_unmultiplied(
                self.accent_color[0],
                self.accent_color[1],
                self.accent_color[2],
                self.accent_color[3],
            ),
            text_scale: self.text_scale.clamp(0.8, 1.4),
        }
    }

    fn from_runtime(theme: ThemeSettings) -> Self {
        Self {
            accent_color: [
                theme.accent_color.r(),
                theme.accent_color.g(),
                theme.accent_color.b(),
                theme.accent_color.a(),
            ],
            text_scale: theme.text_scale.clamp(0.8, 1.4),
        }
    }
}

fn scaled_text_styles(scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    use egui::{FontFamily, FontId, TextStyle};
    [
        (TextStyle::Heading, FontId::new(24.0 * scale, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0 * scale, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0 * scale, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0 * scale, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(11.0 * scale, FontFamily::Proportional)),
    ]
    .into()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn tinted(color: egui::Color32, alpha: u8) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub struct DataBoardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    page: AppPage,
    scroll_target: Option<HomeSection>,
    started_at: Instant,

    trial: TrialSnapshot,
    generation_step: Option<&'static str>,
    pending_files: Vec<String>,

    gallery: GalleryUiState,
    contact: ContactFormState,

    status: String,
    status_banner: Option<StatusBanner>,

    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
    settings_open: bool,
}

impl DataBoardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedDesktopSettings>,
    ) -> Self {
        let theme = persisted_settings.unwrap_or_default().into_runtime();
        Self {
            cmd_tx,
            ui_rx,
            page: AppPage::Home,
            scroll_target: None,
            started_at: Instant::now(),
            trial: TrialSnapshot::idle(),
            generation_step: None,
            pending_files: Vec::new(),
            gallery: GalleryUiState::new(),
            contact: ContactFormState::default(),
            status: "Starting backend worker".to_string(),
            status_banner: None,
            theme,
            applied_theme: None,
            settings_open: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    if matches!(
                        err.context(),
                        UiErrorContext::BackendStartup
                            | UiErrorContext::Upload
                            | UiErrorContext::Generate
                    ) {
                        self.status_banner = Some(StatusBanner {
                            severity: StatusBannerSeverity::Error,
                            message: self.status.clone(),
                        });
                    }
                }
                UiEvent::Trial(event) => self.apply_trial_event(event),
                UiEvent::ContactAccepted => {
                    self.contact.clear_fields();
                    self.contact.submitting = false;
                    self.contact.success_until = Some(Instant::now() + CONTACT_SUCCESS_VISIBLE_FOR);
                    self.status = "Contact message sent".to_string();
                }
                UiEvent::ContactRejected(reason) => {
                    self.contact.submitting = false;
                    self.status = format!("Contact submission failed: {reason}");
                }
            }
        }
    }

    fn apply_trial_event(&mut self, event: TrialEvent) {
        match event {
            TrialEvent::StageChanged(stage) => {
                self.trial.stage = stage;
                match stage {
                    TrialStage::Uploading => {
                        self.trial.upload_progress = 0;
                        self.status = "Uploading data...".to_string();
                    }
                    TrialStage::Analyzed => {
                        self.status = "Data analysis complete".to_string();
                    }
                    TrialStage::Generating => {
                        self.trial.generation_progress = 0;
                        self.status = "Generating dashboard...".to_string();
                    }
                    TrialStage::Ready => {
                        self.status = "Dashboard ready".to_string();
                    }
                    TrialStage::Idle => {}
                }
            }
            TrialEvent::UploadProgress(percent) => {
                self.trial.upload_progress = percent;
            }
            TrialEvent::GenerationProgress { percent, step } => {
                self.trial.generation_progress = percent;
                self.generation_step = Some(step);
            }
            TrialEvent::FileAccepted(metadata) => {
                self.trial.uploaded_file = Some(metadata.file_name.clone());
                self.trial.metadata = Some(metadata);
            }
            TrialEvent::SessionReset => {
                self.trial = TrialSnapshot::idle();
                self.generation_step = None;
                self.pending_files.clear();
                self.status = "Trial reset".to_string();
            }
        }
    }

    fn hero_description(&self) -> &'static str {
        let index =
            (self.started_at.elapsed().as_secs() / HERO_DESCRIPTION_INTERVAL_SECS) as usize;
        HERO_DESCRIPTIONS[index % HERO_DESCRIPTIONS.len()]
    }

    fn tick_gallery_autoplay(&mut self) {
        if self.page == AppPage::Home
            && self.gallery.autoplay
            && self.gallery.last_advance.elapsed() >= GALLERY_AUTOPLAY_INTERVAL
        {
            self.gallery.next_slide();
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.text_styles = scaled_text_styles(self.theme.text_scale);
        style.visuals.selection.bg_fill = self.theme.accent_color;
        style.visuals.hyperlink_color = self.theme.accent_color;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
    }

    fn needs_animation_repaints(&self) -> bool {
        matches!(
            self.trial.stage,
            TrialStage::Uploading | TrialStage::Generating
        ) || self.contact.submitting
            || self.contact.success_visible()
            || self.page == AppPage::Home
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn open_home_section(&mut self, section: HomeSection) {
        self.page = AppPage::Home;
        self.scroll_target = Some(section);
    }

    // ------------------------------ chrome ------------------------------

    fn show_navbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("DataBoard")
                        .strong()
                        .color(self.theme.accent_color),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").on_hover_text("Settings").clicked() {
                        self.settings_open = true;
                    }
                    let try_active = self.page == AppPage::Trial;
                    if ui.selectable_label(try_active, "Try").clicked() {
                        self.page = AppPage::Trial;
                    }
                    if ui.button("Contact").clicked() {
                        self.open_home_section(HomeSection::Contact);
                    }
                    if ui.button("Gallery").clicked() {
                        self.open_home_section(HomeSection::Gallery);
                    }
                    if ui.button("Home").clicked() {
                        self.open_home_section(HomeSection::Header);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_statusbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("statusbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };
            egui::Frame::new()
                .fill(fill)
                .stroke(stroke)
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }
        let mut open = self.settings_open;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Accent color");
                ui.color_edit_button_srgba(&mut self.theme.accent_color);
                ui.add(
                    egui::Slider::new(&mut self.theme.text_scale, 0.8..=1.4)
                        .text("Text scale")
                        .step_by(0.05),
                );
                if ui.button("Reset to defaults").clicked() {
                    self.theme = ThemeSettings::databoard_default();
                }
            });
        self.settings_open = open;
    }

    // ----------------------------- home page -----------------------------

    fn show_home_page(&mut self, ui: &mut egui::Ui) {
        let target = self.scroll_target.take();
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(820.0);
                    self.show_status_banner(ui);

                    let header = ui.scope(|ui| self.render_header_section(ui)).response;
                    ui.add_space(24.0);
                    ui.separator();
                    ui.add_space(24.0);
                    let gallery = ui.scope(|ui| self.render_gallery_section(ui)).response;
                    ui.add_space(24.0);
                    ui.separator();
                    ui.add_space(24.0);
                    let contact = ui.scope(|ui| self.render_contact_section(ui)).response;
                    ui.add_space(32.0);

                    match target {
                        Some(HomeSection::Header) => {
                            header.scroll_to_me(Some(egui::Align::TOP));
                        }
                        Some(HomeSection::Gallery) => {
                            gallery.scroll_to_me(Some(egui::Align::TOP));
                        }
                        Some(HomeSection::Contact) => {
                            contact.scroll_to_me(Some(egui::Align::TOP));
                        }
                        None => {}
                    }
                });
            });
    }

    fn render_header_section(&mut self, ui: &mut egui::Ui) {
        ui.add_space(32.0);
        ui.label(
            egui::RichText::new("DataBoard")
                .size(48.0 * self.theme.text_scale)
                .strong()
                .color(self.theme.accent_color),
        );
        ui.label(
            egui::RichText::new("The Future of Data Analysis")
                .size(20.0 * self.theme.text_scale)
                .strong(),
        );
        ui.add_space(4.0);
        ui.label(egui::RichText::new(self.hero_description()).italics().weak());
        ui.add_space(16.0);

        ui.horizontal_wrapped(|ui| {
            // Keep the CTA row visually centered inside the column.
            ui.add_space(ui.available_width() / 2.0 - 140.0);
            let get_started = egui::Button::new(
                egui::RichText::new("▶ Get Started")
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(self.theme.accent_color)
            .min_size(egui::vec2(130.0, 36.0));
            if ui.add(get_started).clicked() {
                self.page = AppPage::Trial;
            }
            let learn_more =
                egui::Button::new("Learn More").min_size(egui::vec2(110.0, 36.0));
            if ui.add(learn_more).clicked() {
                self.scroll_target = Some(HomeSection::Gallery);
            }
        });

        ui.add_space(24.0);
        ui.horizontal_wrapped(|ui| {
            ui.add_space(ui.available_width() / 2.0 - 290.0);
            self.render_feature_card(ui, "📊", "Smart Analytics", "AI-powered insights", ACCENT_BLUE);
            self.render_feature_card(
                ui,
                "⚡",
                "Lightning Fast",
                "Real-time processing",
                ACCENT_PURPLE,
            );
            self.render_feature_card(
                ui,
                "🛡",
                "Secure & Reliable",
                "Enterprise-grade security",
                ACCENT_PINK,
            );
        });
    }

    fn render_feature_card(
        &self,
        ui: &mut egui::Ui,
        icon: &str,
        title: &str,
        blurb: &str,
        tint: egui::Color32,
    ) {
        egui::Frame::new()
            .fill(tinted(tint, 18))
            .stroke(egui::Stroke::new(1.0, tinted(tint, 80)))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(16, 12))
            .show(ui, |ui| {
                ui.set_width(150.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(icon).size(24.0));
                    ui.label(egui::RichText::new(title).strong());
                    ui.small(blurb);
                });
            });
    }

    fn render_gallery_section(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("Gallery").strong().color(self.theme.accent_color));
        ui.label("Explore stunning data visualizations and dashboard examples");
        ui.add_space(12.0);

        let tint = GALLERY_TINTS[self.gallery.current_index % GALLERY_TINTS.len()];
        let item = self.gallery.current_item().clone();
        egui::Frame::new()
            .fill(tinted(tint, 26))
            .stroke(egui::Stroke::new(1.0, tinted(tint, 110)))
            .corner_radius(egui::CornerRadius::same(14))
            .inner_margin(egui::Margin::symmetric(18, 16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width().min(640.0));
                ui.set_min_height(140.0);
                ui.horizontal(|ui| {
                    self.render_badge(ui, &item.category, tint);
                });
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(&item.title)
                        .size(20.0 * self.theme.text_scale)
                        .strong(),
                );
                ui.label(egui::RichText::new(&item.description).weak());
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Previous").clicked() {
                self.gallery.prev_slide();
            }
            ui.label(format!(
                "{} / {}",
                self.gallery.current_index + 1,
                self.gallery.items.len()
            ));
            if ui.button("▶").on_hover_text("Next").clicked() {
                self.gallery.next_slide();
            }
            ui.add_space(16.0);
            ui.checkbox(&mut self.gallery.autoplay, "Auto-play");
        });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Browse Collection").strong());
        ui.horizontal_wrapped(|ui| {
            let titles: Vec<String> = self
                .gallery
                .items
                .iter()
                .map(|item| item.title.clone())
                .collect();
            for (index, title) in titles.iter().enumerate() {
                let selected = index == self.gallery.current_index;
                if ui.selectable_label(selected, title).clicked() {
                    self.gallery.go_to_slide(index);
                }
            }
        });
    }

    fn render_badge(&self, ui: &mut egui::Ui, text: &str, tint: egui::Color32) {
        egui::Frame::new()
            .fill(tinted(tint, 46))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(8, 3))
            .show(ui, |ui| {
                ui.small(egui::RichText::new(text).color(tint).strong());
            });
    }

    fn render_contact_section(&mut self, ui: &mut egui::Ui) {
        ui.heading(
            egui::RichText::new("Get In Touch")
                .strong()
                .color(self.theme.accent_color),
        );
        ui.label("Have questions about DataBoard? We'd love to hear from you.");
        ui.small("Send us a message and we'll respond as soon as possible.");
        ui.add_space(12.0);

        ui.horizontal_wrapped(|ui| {
            ui.add_space(ui.available_width() / 2.0 - 300.0);
            self.render_contact_info_card(
                ui,
                "✉",
                "Email Us",
                "support@databoard.com",
                "We'll respond within 24 hours",
            );
            self.render_contact_info_card(
                ui,
                "☎",
                "Call Us",
                "+1 (555) 123-4567",
                "Mon-Fri, 9AM-6PM EST",
            );
            self.render_contact_info_card(
                ui,
                "📍",
                "Visit Us",
                "123 Data Street",
                "San Francisco, CA 94102",
            );
        });
        ui.add_space(12.0);

        if self.contact.success_visible() {
            egui::Frame::new()
                .fill(tinted(ACCENT_GREEN, 28))
                .stroke(egui::Stroke::new(1.0, tinted(ACCENT_GREEN, 120)))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(
                            "✔ Message sent successfully! We'll get back to you soon.",
                        )
                        .color(ACCENT_GREEN)
                        .strong(),
                    );
                });
            ui.add_space(8.0);
        }

        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(16, 14))
            .show(ui, |ui| {
                ui.set_width(ui.available_width().min(560.0));

                self.render_form_field(ui, "Name *", "Your full name", FormField::Name);
                self.render_form_field(ui, "Email *", "your@email.com", FormField::Email);
                self.render_form_field(ui, "Subject", "What's this about?", FormField::Subject);
                self.render_form_field(
                    ui,
                    "Message *",
                    "Tell us how we can help you...",
                    FormField::Message,
                );

                ui.add_space(8.0);
                let submit_label = if self.contact.submitting {
                    "Sending..."
                } else {
                    "Send Message"
                };
                let submit = egui::Button::new(
                    egui::RichText::new(submit_label)
                        .strong()
                        .color(egui::Color32::WHITE),
                )
                .fill(self.theme.accent_color)
                .min_size(egui::vec2(140.0, 34.0));
                if ui.add_enabled(!self.contact.submitting, submit).clicked()
                    && self.contact.validate()
                {
                    let request = self.contact.to_request();
                    self.contact.submitting = true;
                    self.dispatch(BackendCommand::SubmitContact(request));
                }
            });
    }

    fn render_contact_info_card(
        &self,
        ui: &mut egui::Ui,
        icon: &str,
        title: &str,
        info: &str,
        subinfo: &str,
    ) {
        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.set_width(170.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(icon).size(20.0).color(self.theme.accent_color));
                    ui.label(egui::RichText::new(title).strong());
                    ui.label(info);
                    ui.small(egui::RichText::new(subinfo).weak());
                });
            });
    }

    fn render_form_field(
        &mut self,
        ui: &mut egui::Ui,
        label: &str,
        hint: &str,
        field: FormField,
    ) {
        ui.label(egui::RichText::new(label).strong());
        let (value, error, multiline) = match field {
            FormField::Name => (&mut self.contact.name, self.contact.name_error, false),
            FormField::Email => (&mut self.contact.email, self.contact.email_error, false),
            FormField::Subject => (&mut self.contact.subject, None, false),
            FormField::Message => (&mut self.contact.message, self.contact.message_error, true),
        };
        let edit = if multiline {
            egui::TextEdit::multiline(value)
                .hint_text(hint)
                .desired_rows(4)
                .desired_width(f32::INFINITY)
        } else {
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width(f32::INFINITY)
        };
        let response = ui.add(edit);
        if response.changed() {
            match field {
                FormField::Name => self.contact.name_error = None,
                FormField::Email => self.contact.email_error = None,
                FormField::Message => self.contact.message_error = None,
                FormField::Subject => {}
            }
        }
        if let Some(error) = error {
            ui.small(egui::RichText::new(error).color(egui::Color32::from_rgb(220, 80, 80)));
        }
        ui.add_space(4.0);
    }

    // ----------------------------- trial page -----------------------------

    fn show_trial_page(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(640.0);
                    self.show_status_banner(ui);
                    ui.add_space(24.0);
                    ui.label(
                        egui::RichText::new("Try DataBoard Free")
                            .size(32.0 * self.theme.text_scale)
                            .strong()
                            .color(self.theme.accent_color),
                    );
                    ui.label("Upload your data and see the magic happen in real-time");
                    ui.small(
                        egui::RichText::new(
                            "No signup required • Secure processing • Instant results",
                        )
                        .weak(),
                    );
                    ui.add_space(20.0);

                    match self.trial.stage {
                        TrialStage::Idle => self.render_upload_panel(ui),
                        TrialStage::Uploading => self.render_uploading_panel(ui),
                        TrialStage::Analyzed => self.render_analysis_panel(ui),
                        TrialStage::Generating => self.render_generation_panel(ui),
                        TrialStage::Ready => self.render_ready_panel(ui),
                    }
                    ui.add_space(32.0);
                });
            });
    }

    fn collect_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped: Vec<String> = ui.ctx().input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| {
                    file.path
                        .as_ref()
                        .map(|path| path.display().to_string())
                        .or_else(|| (!file.name.is_empty()).then(|| file.name.clone()))
                })
                .collect()
        });
        if !dropped.is_empty() {
            self.pending_files = dropped;
        }
    }

    fn render_upload_panel(&mut self, ui: &mut egui::Ui) {
        self.collect_dropped_files(ui);

        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("☁").size(34.0).color(self.theme.accent_color));
                    ui.label(
                        egui::RichText::new("Upload Your Data")
                            .size(22.0 * self.theme.text_scale)
                            .strong(),
                    );
                    ui.label("Drop your CSV or Excel files here to get started");
                    ui.add_space(10.0);

                    egui::Frame::new()
                        .stroke(egui::Stroke::new(1.5, tinted(self.theme.accent_color, 140)))
                        .corner_radius(egui::CornerRadius::same(12))
                        .inner_margin(egui::Margin::symmetric(28, 24))
                        .show(ui, |ui| {
                            ui.vertical_centered(|ui| {
                                ui.label("Click to browse or drag & drop");
                                ui.small(egui::RichText::new("Supports .csv, .xlsx, .xls files").weak());
                                ui.add_space(6.0);
                                if ui.button("Browse files...").clicked() {
                                    if let Some(path) = rfd::FileDialog::new()
                                        .add_filter("Data files", &["csv", "xlsx", "xls"])
                                        .pick_file()
                                    {
                                        self.pending_files = vec![path.display().to_string()];
                                    }
                                }
                                if let Some(first) = self.pending_files.first() {
                                    ui.add_space(4.0);
                                    ui.small(format!("Selected: {first}"));
                                }
                            });
                        });

                    ui.add_space(10.0);
                    let process = egui::Button::new(
                        egui::RichText::new("Process Upload")
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .fill(self.theme.accent_color)
                    .min_size(egui::vec2(150.0, 36.0));
                    if ui
                        .add_enabled(!self.pending_files.is_empty(), process)
                        .clicked()
                    {
                        let files = self.pending_files.clone();
                        self.dispatch(BackendCommand::BeginUpload { files });
                    }
                });
            });
    }

    fn render_uploading_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "Uploading... {}%",
                            self.trial.upload_progress
                        ))
                        .color(self.theme.accent_color)
                        .strong(),
                    );
                    ui.add(
                        egui::ProgressBar::new(self.trial.upload_progress as f32 / 100.0)
                            .desired_width(300.0)
                            .fill(self.theme.accent_color),
                    );
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        self.dispatch(BackendCommand::ResetTrial);
                    }
                });
            });
    }

    fn render_analysis_panel(&mut self, ui: &mut egui::Ui) {
        let Some(metadata) = self.trial.metadata.clone() else {
            // Metadata always accompanies the Analyzed stage; losing it means
            // the session got out of sync, so fall back to a restart.
            self.render_upload_panel(ui);
            return;
        };

        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Data Analysis Complete")
                            .size(20.0 * self.theme.text_scale)
                            .strong()
                            .color(ACCENT_GREEN),
                    );
                    ui.small(format!("File: {}", metadata.file_name));
                    ui.add_space(12.0);

                    ui.horizontal_wrapped(|ui| {
                        ui.add_space(ui.available_width() / 2.0 - 210.0);
                        self.render_stat_card(
                            ui,
                            &group_thousands(metadata.row_count),
                            "Rows",
                            ACCENT_BLUE,
                        );
                        self.render_stat_card(
                            ui,
                            &metadata.column_count.to_string(),
                            "Columns",
                            ACCENT_PURPLE,
                        );
                        self.render_stat_card(ui, &metadata.size_label, "Size", ACCENT_PINK);
                    });

                    ui.add_space(12.0);
                    ui.label(egui::RichText::new("Detected Columns").strong());
                    ui.horizontal_wrapped(|ui| {
                        for name in metadata.column_names.iter().take(5) {
                            self.render_badge(ui, name, ACCENT_BLUE);
                        }
                        if metadata.column_names.len() > 5 {
                            self.render_badge(
                                ui,
                                &format!("+{} more", metadata.column_names.len() - 5),
                                ACCENT_PURPLE,
                            );
                        }
                    });

                    ui.add_space(14.0);
                    let generate = egui::Button::new(
                        egui::RichText::new("⚡ Generate Dashboard")
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .fill(ACCENT_GREEN)
                    .min_size(egui::vec2(180.0, 38.0));
                    if ui.add(generate).clicked() {
                        self.dispatch(BackendCommand::GenerateDashboard);
                    }
                    if ui.button("Start over").clicked() {
                        self.dispatch(BackendCommand::ResetTrial);
                    }
                });
            });
    }

    fn render_stat_card(
        &self,
        ui: &mut egui::Ui,
        value: &str,
        label: &str,
        tint: egui::Color32,
    ) {
        egui::Frame::new()
            .fill(tinted(tint, 24))
            .corner_radius(egui::CornerRadius::same(12))
            .inner_margin(egui::Margin::symmetric(18, 12))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(value)
                            .size(22.0 * self.theme.text_scale)
                            .strong()
                            .color(tint),
                    );
                    ui.small(egui::RichText::new(label).weak());
                });
            });
    }

    fn render_generation_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new("Generating Your Dashboard")
                            .size(20.0 * self.theme.text_scale)
                            .strong(),
                    );
                    ui.label("Please wait while we create your personalized analytics dashboard");
                    ui.add_space(6.0);
                    ui.small(
                        egui::RichText::new(self.generation_step.unwrap_or("Preparing..."))
                            .color(self.theme.accent_color),
                    );
                    ui.add(
                        egui::ProgressBar::new(self.trial.generation_progress as f32 / 100.0)
                            .desired_width(360.0)
                            .fill(self.theme.accent_color),
                    );
                    ui.small(format!("{}% Complete", self.trial.generation_progress));
                    ui.add_space(8.0);
                    if ui.button("Cancel").clicked() {
                        self.dispatch(BackendCommand::ResetTrial);
                    }
                });
            });
    }

    fn render_ready_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(16))
            .inner_margin(egui::Margin::symmetric(24, 20))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("✔").size(40.0).color(ACCENT_GREEN));
                    ui.label(
                        egui::RichText::new("Dashboard Ready!")
                            .size(22.0 * self.theme.text_scale)
                            .strong(),
                    );
                    ui.label("Your interactive dashboard has been generated successfully");
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        ui.add_space(ui.available_width() / 2.0 - 140.0);
                        let view = egui::Button::new(
                            egui::RichText::new("View Dashboard")
                                .strong()
                                .color(egui::Color32::WHITE),
                        )
                        .fill(ACCENT_GREEN)
                        .min_size(egui::vec2(140.0, 34.0));
                        if ui.add(view).clicked() {
                            self.status =
                                "The dashboard viewer is not part of the trial build".to_string();
                        }
                        if ui.button("Export").clicked() {
                            self.status =
                                "Export is not part of the trial build".to_string();
                        }
                    });

                    ui.add_space(14.0);
                    ui.small(egui::RichText::new("Want to try another file?").weak());
                    if ui.button("Upload New File").clicked() {
                        self.dispatch(BackendCommand::ResetTrial);
                    }
                });
            });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl eframe::App for DataBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);
        self.tick_gallery_autoplay();

        self.show_navbar(ctx);
        self.show_statusbar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            AppPage::Home => self.show_home_page(ui),
            AppPage::Trial => self.show_trial_page(ui),
        });
        self.show_settings_window(ctx);

        if self.needs_animation_repaints() {
            ctx.request_repaint_after(ANIMATION_REPAINT_INTERVAL);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedDesktopSettings::from_runtime(self.theme);
        if let Ok(text) = serde_json::to_string(&persisted) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::{UiError, UiErrorCategory};

    #[test]
    fn groups_row_counts_with_thousands_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(15_420), "15,420");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn gallery_navigation_wraps_in_both_directions() {
        let mut gallery = GalleryUiState::new();
        assert_eq!(gallery.current_index, 0);
        gallery.prev_slide();
        assert_eq!(gallery.current_index, gallery.items.len() - 1);
        gallery.next_slide();
        assert_eq!(gallery.current_index, 0);
        gallery.go_to_slide(3);
        assert_eq!(gallery.current_index, 3);
        // Out-of-range jumps are ignored.
        gallery.go_to_slide(99);
        assert_eq!(gallery.current_index, 3);
    }

    #[test]
    fn contact_form_requires_name_email_and_message() {
        let mut form = ContactFormState::default();
        assert!(!form.validate());
        assert_eq!(form.name_error, Some("Name is required"));
        assert_eq!(form.email_error, Some("Email is required"));
        assert_eq!(form.message_error, Some("Message is required"));

        form.name = "Ada".to_string();
        form.email = "not-an-email".to_string();
        form.message = "Hello".to_string();
        assert!(!form.validate());
        assert_eq!(form.email_error, Some("Please enter a valid email"));

        form.email = "ada@example.com".to_string();
        assert!(form.validate());
        assert!(form.name_error.is_none());
        assert!(form.email_error.is_none());
        assert!(form.message_error.is_none());
    }

    #[test]
    fn contact_request_trims_whitespace() {
        let form = ContactFormState {
            name: "  Ada ".to_string(),
            email: " ada@example.com ".to_string(),
            subject: String::new(),
            message: " Hi \n".to_string(),
            ..Default::default()
        };
        let request = form.to_request();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.message, "Hi");
    }

    #[test]
    fn classifies_required_field_messages_as_validation() {
        let err = UiError::from_message(UiErrorContext::Contact, "name is required");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn persisted_settings_clamp_text_scale_on_reload() {
        let persisted = PersistedDesktopSettings {
            accent_color: [59, 130, 246, 255],
            text_scale: 9.0,
        };
        let theme = persisted.into_runtime();
        assert!(theme.text_scale <= 1.4);
    }
}
