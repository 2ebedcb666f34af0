use crate::error::CardError;

/// One entry of the ceremony: the button label shown before it runs and the
/// side effect it performs.
pub struct Step {
    pub label: String,
    action: Box<dyn FnMut()>,
}

impl Step {
    pub fn new(label: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step").field("label", &self.label).finish()
    }
}

/// Index-and-dispatch driver over a fixed list of steps.
///
/// The index only moves forward and stops at the last step. Advancing while
/// already on the last step runs that step's action again on every call.
pub struct StepDriver {
    steps: Vec<Step>,
    current: usize,
    on_reset: Box<dyn FnMut()>,
}

impl StepDriver {
    pub fn new(steps: Vec<Step>, on_reset: impl FnMut() + 'static) -> Result<Self, CardError> {
        if steps.is_empty() {
            return Err(CardError::NoSteps);
        }
        Ok(Self {
            steps,
            current: 0,
            on_reset: Box::new(on_reset),
        })
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn is_at_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Label of the step the next `advance` will run.
    pub fn current_label(&self) -> &str {
        &self.steps[self.current].label
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label.as_str())
    }

    /// Run the current step, then move to the next one (clamped to the last).
    /// Returns the label of the step now current.
    pub fn advance(&mut self) -> &str {
        let ran = self.current;
        (self.steps[ran].action)();
        self.current = (self.current + 1).min(self.steps.len() - 1);
        log::info!(
            "[steps] ran {:?} ({}/{})",
            self.steps[ran].label,
            ran + 1,
            self.steps.len()
        );
        self.current_label()
    }

    /// Undo every step's visual effect and rewind to the first step.
    pub fn reset(&mut self) {
        (self.on_reset)();
        self.current = 0;
        log::info!("[steps] reset");
    }
}
