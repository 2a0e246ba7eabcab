use reelscore_config::LlmConfig;

const TREND_TEMPLATE: &str = "You are a short-form video agency looking for signs of emerging trends \
in the following video descriptions, to plan new content. Analyse the descriptions and identify:

1. Recurring themes and patterns
2. Hashtags that perform well
3. Content formats that work
4. Recommendations for new content (give concrete example video ideas)

Stop after point 4 and add nothing else.
";

/// Everything needed to ask for one trend summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRequest {
    /// Numbered description listing, one per line.
    pub descriptions: String,
    /// Free text the user wants the analysis to take into account.
    pub context: Option<String>,
    pub language: String,
    pub max_tokens: u32,
}

impl TrendRequest {
    pub fn new(descriptions: impl Into<String>, config: &LlmConfig) -> Self {
        Self {
            descriptions: descriptions.into(),
            context: None,
            language: config.language.clone(),
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn prompt(&self) -> String {
        let mut prompt = String::from(TREND_TEMPLATE);

        if let Some(context) = &self.context {
            prompt.push_str("\nAdditional information:\n");
            prompt.push_str(context.trim());
            prompt.push_str(
                "\n\nGive this information particular weight in your analysis and recommendations.\n",
            );
        }

        prompt.push_str("\nDescriptions:\n");
        prompt.push_str(&self.descriptions);
        if !self.descriptions.ends_with('\n') {
            prompt.push('\n');
        }

        prompt.push_str(&format!(
            "\nAnswer in {} and format your answer as Markdown.\n",
            self.language
        ));
        prompt
    }
}
