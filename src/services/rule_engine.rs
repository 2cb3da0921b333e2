use crate::events::{EffectParameters, Notification, RenderDecision};
use crate::rules::{parse_rules, CompiledRule};
use crate::services::NotificationSink;
use crate::trace_if_enabled;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Снимок состояния движка. Никогда не изменяется после публикации.
#[derive(Debug, Default)]
struct EngineState {
    raw_rules: String,
    rules: Vec<CompiledRule>,
    parameters: EffectParameters,
    generation: u64,
}

impl EngineState {
    fn matches(&self, window_title: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(window_title))
    }
}

/// RuleEngine хранит активные правила выбора окон и параметры эффекта.
///
/// Перезагрузка строит новое состояние целиком и только потом подменяет
/// указатель под блокировкой. Запросы берут `Arc` на текущий снимок и работают
/// с ним без блокировки, поэтому читатель видит либо старое состояние целиком,
/// либо новое целиком.
pub struct RuleEngine {
    state: RwLock<Arc<EngineState>>,
    sink: Arc<dyn NotificationSink>,
}

impl RuleEngine {
    /// Пустой движок: правил нет, ни одно окно не подходит
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            state: RwLock::new(Arc::new(EngineState::default())),
            sink,
        }
    }

    fn snapshot(&self) -> Arc<EngineState> {
        self.state.read().clone()
    }

    /// Атомарно заменяет правила и параметры.
    ///
    /// Ошибочные сегменты отбрасываются, по каждому уходит одно уведомление.
    pub fn reload(&self, raw_rules: &str, parameters: EffectParameters) {
        let parsed = parse_rules(raw_rules);
        let active = parsed.rules.len();

        let generation = {
            let mut state = self.state.write();
            let generation = state.generation + 1;
            *state = Arc::new(EngineState {
                raw_rules: raw_rules.to_string(),
                rules: parsed.rules,
                parameters,
                generation,
            });
            generation
        };

        for rejected in &parsed.rejected {
            warn!("Правило отброшено: {}", rejected);
            self.sink.notify(Notification::invalid_rule(&rejected.segment));
        }

        info!(
            "Правила перезагружены (поколение {}): {} активно, {} отброшено; {}",
            generation,
            active,
            parsed.rejected.len(),
            parameters
        );
    }

    /// Есть ли хотя бы одно правило, найденное где-либо в заголовке
    pub fn matches(&self, window_title: &str) -> bool {
        self.snapshot().matches(window_title)
    }

    pub fn current_parameters(&self) -> EffectParameters {
        self.snapshot().parameters
    }

    /// Совпадение и параметры из одного снимка
    pub fn classify(&self, window_title: &str) -> RenderDecision {
        let state = self.snapshot();
        let apply = state.matches(window_title);
        trace_if_enabled!(
            "Окно '{}': эффект {} (поколение {})",
            window_title,
            if apply { "применяется" } else { "не применяется" },
            state.generation
        );
        RenderDecision {
            apply,
            parameters: state.parameters,
        }
    }

    pub fn rule_count(&self) -> usize {
        self.snapshot().rules.len()
    }

    /// Исходные тексты активных правил в порядке появления
    pub fn patterns(&self) -> Vec<String> {
        self.snapshot()
            .rules
            .iter()
            .map(|rule| rule.pattern().to_string())
            .collect()
    }

    pub fn raw_rules(&self) -> String {
        self.snapshot().raw_rules.clone()
    }

    /// Номер последней перезагрузки, 0 до первой
    pub fn generation(&self) -> u64 {
        self.snapshot().generation
    }
}
