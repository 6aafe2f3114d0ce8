use crate::core::engine::QuoteEngine;
use crate::core::lead::compose_message;
use crate::core::wizard::Wizard;
use crate::domain::model::LeadForm;
use crate::domain::ports::LeadNotifier;
use crate::utils::error::{QuoteError, Result};
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// 一次報價流程：精靈、聯絡表單與送出狀態
#[derive(Debug, Clone)]
pub struct QuoteSession {
    wizard: Wizard,
    lead: LeadForm,
    submission: SubmissionState,
}

impl QuoteSession {
    pub fn new(engine: QuoteEngine) -> Self {
        Self {
            wizard: Wizard::new(engine),
            lead: LeadForm::default(),
            submission: SubmissionState::Idle,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn lead(&self) -> &LeadForm {
        &self.lead
    }

    pub fn set_lead(&mut self, lead: LeadForm) {
        self.lead = lead;
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// 送出按鈕是否可用
    pub fn can_submit(&self) -> bool {
        self.submission == SubmissionState::Idle
            && self.wizard.is_lead_form_enabled()
            && self.lead.is_complete()
    }

    /// 檢查狀態並切換到 Loading，回傳要送出的訊息
    pub fn begin_submission(&mut self, submitted_at: NaiveDateTime) -> Result<String> {
        let refusal = match &self.submission {
            SubmissionState::Loading => Some("Заявка уже отправляется."),
            SubmissionState::Success => Some("Заявка уже отправлена. Начните новый расчет."),
            SubmissionState::Error(_) => Some("Сначала закройте сообщение об ошибке."),
            SubmissionState::Idle if !self.wizard.is_lead_form_enabled() => {
                Some("Для отправки заявки, пожалуйста, пройдите все шаги расчета.")
            }
            SubmissionState::Idle if !self.lead.is_complete() => {
                Some("Заполните имя, телефон и email.")
            }
            SubmissionState::Idle => None,
        };
        if let Some(reason) = refusal {
            return Err(QuoteError::SubmissionRefused {
                reason: reason.to_string(),
            });
        }

        let message = compose_message(
            &self.lead,
            self.wizard.configuration(),
            self.wizard.breakdown(),
            submitted_at,
        );
        self.submission = SubmissionState::Loading;
        Ok(message)
    }

    pub fn finish_submission(&mut self, outcome: &Result<()>) {
        self.submission = match outcome {
            Ok(()) => {
                tracing::info!("✅ Lead submitted");
                SubmissionState::Success
            }
            Err(e) => {
                tracing::error!("❌ Lead submission failed: {}", e);
                SubmissionState::Error(e.user_friendly_message())
            }
        };
    }

    /// 送出詢價；同一時間只會有一筆在途中
    pub async fn submit<N>(&mut self, notifier: &N) -> Result<()>
    where
        N: LeadNotifier + ?Sized,
    {
        let message = self.begin_submission(Local::now().naive_local())?;
        let outcome = notifier.submit_lead(&message).await;
        self.finish_submission(&outcome);
        outcome
    }

    /// 關閉錯誤訊息，允許再試一次
    pub fn dismiss_error(&mut self) {
        if matches!(self.submission, SubmissionState::Error(_)) {
            self.submission = SubmissionState::Idle;
        }
    }

    /// 「新的計算」：清空表單、送出狀態並重設精靈
    pub fn start_new_calculation(&mut self) {
        self.lead = LeadForm::default();
        self.submission = SubmissionState::Idle;
        self.wizard.reset();
    }
}
