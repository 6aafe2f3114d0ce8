//! 報價精靈：持有目前的設定與步驟，每次變更後重新計價。
//!
//! 步驟是線性的：設定 → 尺寸 → 選配 → 安裝。尺寸步驟有錯誤時不能前進。

use crate::core::engine::QuoteEngine;
use crate::domain::model::{ConfigChange, Configuration, PriceBreakdown, ValidationErrors};
use crate::utils::error::{QuoteError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Configuration,
    Dimensions,
    Options,
    Installation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Configuration,
        WizardStep::Dimensions,
        WizardStep::Options,
        WizardStep::Installation,
    ];
    pub const FIRST: WizardStep = WizardStep::Configuration;
    pub const LAST: WizardStep = WizardStep::Installation;

    /// 1 起算的步驟編號
    pub const fn number(self) -> usize {
        match self {
            WizardStep::Configuration => 1,
            WizardStep::Dimensions => 2,
            WizardStep::Options => 3,
            WizardStep::Installation => 4,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Configuration => "Конфигурация",
            WizardStep::Dimensions => "Размеры",
            WizardStep::Options => "Опции",
            WizardStep::Installation => "Монтаж",
        }
    }

    pub const fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Configuration => Some(WizardStep::Dimensions),
            WizardStep::Dimensions => Some(WizardStep::Options),
            WizardStep::Options => Some(WizardStep::Installation),
            WizardStep::Installation => None,
        }
    }

    pub const fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Configuration => None,
            WizardStep::Dimensions => Some(WizardStep::Configuration),
            WizardStep::Options => Some(WizardStep::Dimensions),
            WizardStep::Installation => Some(WizardStep::Options),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.number(), WizardStep::ALL.len(), self.title())
    }
}

#[derive(Debug, Clone)]
pub struct Wizard {
    engine: QuoteEngine,
    config: Configuration,
    step: WizardStep,
    errors: ValidationErrors,
    breakdown: PriceBreakdown,
    summary_visible: bool,
}

impl Wizard {
    pub fn new(engine: QuoteEngine) -> Self {
        let mut wizard = Self {
            engine,
            config: Configuration::default(),
            step: WizardStep::FIRST,
            errors: ValidationErrors::default(),
            breakdown: PriceBreakdown::default(),
            summary_visible: false,
        };
        wizard.recompute();
        wizard
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }

    pub fn is_summary_visible(&self) -> bool {
        self.summary_visible
    }

    /// 詢價表單只在最後一步開放
    pub fn is_lead_form_enabled(&self) -> bool {
        self.step == WizardStep::LAST
    }

    pub fn update(&mut self, change: ConfigChange) {
        tracing::debug!("Configuration change: {:?}", change);
        self.config.apply(change);
        self.recompute();
    }

    pub fn can_advance(&self) -> bool {
        if self.step.next().is_none() {
            return false;
        }
        !(self.step == WizardStep::Dimensions && !self.errors.is_empty())
    }

    pub fn advance(&mut self) -> Result<WizardStep> {
        let next = self.step.next().ok_or_else(|| QuoteError::NavigationError {
            message: "Это последний шаг расчета.".to_string(),
        })?;

        if !self.can_advance() {
            return Err(QuoteError::NavigationError {
                message: "Исправьте размеры проема, чтобы продолжить.".to_string(),
            });
        }

        self.step = next;
        self.recompute();
        tracing::debug!("➡️ Advanced to step {}", self.step);
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> Result<WizardStep> {
        let previous = self.step.previous().ok_or_else(|| QuoteError::NavigationError {
            message: "Это первый шаг расчета.".to_string(),
        })?;

        if self.step == WizardStep::LAST {
            self.summary_visible = false;
        }
        self.step = previous;
        self.recompute();
        tracing::debug!("⬅️ Went back to step {}", self.step);
        Ok(self.step)
    }

    pub fn show_summary(&mut self) -> Result<()> {
        if self.step != WizardStep::LAST {
            return Err(QuoteError::NavigationError {
                message: "Итог доступен после прохождения всех шагов.".to_string(),
            });
        }
        self.summary_visible = true;
        Ok(())
    }

    /// 回到第一步並還原預設設定
    pub fn reset(&mut self) {
        self.step = WizardStep::FIRST;
        self.config = Configuration::default();
        self.summary_visible = false;
        self.recompute();
        tracing::debug!("🔄 Wizard reset");
    }

    fn recompute(&mut self) {
        self.breakdown = self.engine.calculate(&self.config);
        self.errors = if self.step == WizardStep::Dimensions {
            self.engine.validate(&self.config)
        } else {
            ValidationErrors::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::PriceCatalog;
    use crate::domain::model::{DoorType, Quantity, Region};
    use rust_decimal::Decimal;

    fn wizard() -> Wizard {
        Wizard::new(QuoteEngine::new(PriceCatalog::builtin().unwrap()))
    }

    #[test]
    fn test_steps_are_linear() {
        assert_eq!(WizardStep::FIRST.next(), Some(WizardStep::Dimensions));
        assert_eq!(WizardStep::LAST.next(), None);
        assert_eq!(WizardStep::FIRST.previous(), None);
        for step in WizardStep::ALL {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(step));
            }
        }
        assert_eq!(WizardStep::Options.to_string(), "3/4 Опции");
    }

    #[test]
    fn test_new_wizard_has_prices_and_no_errors() {
        let wizard = wizard();
        assert_eq!(wizard.step(), WizardStep::Configuration);
        assert_eq!(wizard.breakdown().total_price, Decimal::from(334307));
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_errors_only_on_dimensions_step() {
        let mut wizard = wizard();
        wizard.update(ConfigChange::Width(500));
        // 第一步不做尺寸驗證
        assert!(wizard.errors().is_empty());
        assert!(wizard.can_advance());

        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::Dimensions);
        assert!(wizard.errors().width.is_some());
        assert!(!wizard.can_advance());
        assert!(matches!(
            wizard.advance(),
            Err(QuoteError::NavigationError { .. })
        ));

        // 回上一步時清除錯誤，不再驗證
        wizard.retreat().unwrap();
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn test_fixing_dimensions_unblocks_next() {
        let mut wizard = wizard();
        wizard.advance().unwrap();
        wizard.update(ConfigChange::Height(5000));
        assert!(!wizard.can_advance());

        wizard.update(ConfigChange::Height(2200));
        assert!(wizard.can_advance());
        assert_eq!(wizard.advance().unwrap(), WizardStep::Options);
    }

    #[test]
    fn test_every_change_recomputes_price() {
        let mut wizard = wizard();
        let before = wizard.breakdown().total_price;

        wizard.update(ConfigChange::Quantity(Quantity::new(2)));
        assert_ne!(wizard.breakdown().total_price, before);

        wizard.update(ConfigChange::Region(Region::Chelny));
        assert_eq!(wizard.breakdown().installation_price, Decimal::from(30000));
    }

    #[test]
    fn test_cannot_pass_last_step_or_before_first() {
        let mut wizard = wizard();
        assert!(wizard.retreat().is_err());
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.step(), WizardStep::LAST);
        assert!(!wizard.can_advance());
        assert!(wizard.advance().is_err());
        assert!(wizard.is_lead_form_enabled());
    }

    #[test]
    fn test_leaving_last_step_hides_summary() {
        let mut wizard = wizard();
        assert!(wizard.show_summary().is_err());
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
        wizard.show_summary().unwrap();
        assert!(wizard.is_summary_visible());

        wizard.retreat().unwrap();
        assert!(!wizard.is_summary_visible());
        assert!(!wizard.is_lead_form_enabled());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut wizard = wizard();
        wizard.update(ConfigChange::DoorType(DoorType::TelescopicTwoWay));
        wizard.update(ConfigChange::Width(2600));
        wizard.update(ConfigChange::Painting(false));
        wizard.update(ConfigChange::Installation(false));
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        wizard.reset();

        assert_eq!(wizard.configuration(), &Configuration::default());
        assert_eq!(wizard.step(), WizardStep::FIRST);
        assert!(!wizard.is_summary_visible());
        assert_eq!(wizard.breakdown(), &wizard.engine().calculate(&Configuration::default()));
    }
}
