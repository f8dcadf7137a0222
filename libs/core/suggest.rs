use std::collections::HashMap;
use std::time::Duration;

use daybook_store_core::RecordQuery;
use lazy_regex::regex;
use serde_derive::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    errors::{CoreError, CoreResult},
    Core,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const RECENT_RECORDS_SCANNED: u32 = 100;
const RECENT_TAGS_KEPT: usize = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str =
    "你是一个文本标签提取工具，任务是从输入文本中提取核心标签，输出内容仅限标签，无其他多余文字。";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl Core {
    /// Suggests tags for a todo by asking an OpenAI-compatible endpoint,
    /// seeding the prompt with the tags already in use. A missing `[ai]`
    /// configuration quietly yields no suggestion.
    pub async fn suggest_tags(&self, content: &str) -> CoreResult<Vec<String>> {
        let Some(ai) = &self.ai else {
            return Ok(Vec::new());
        };
        if ai.api_key.is_empty() {
            return Ok(Vec::new());
        }

        // Suggestions degrade gracefully without the existing-tag context.
        let existing_tags = match self.recent_tags().await {
            Ok(tags) => tags,
            Err(err) => {
                warn!(%err, "failed to collect recent tags");
                Vec::new()
            }
        };

        let base_url = ai
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let request = ChatRequest {
            model: ai.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            messages: vec![
                ChatMessage {
                    role: "system".to_owned(),
                    content: SYSTEM_PROMPT.to_owned(),
                },
                ChatMessage {
                    role: "user".to_owned(),
                    content: build_prompt(content, &existing_tags),
                },
            ],
        };

        let response = self
            .http
            .post(format!("{base_url}/chat/completions"))
            .bearer_auth(&ai.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|err| CoreError::Suggest(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| CoreError::Suggest(err.to_string()))?;
        if !status.is_success() {
            return Err(CoreError::Suggest(format!("status {status}: {body}")));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|err| CoreError::Suggest(err.to_string()))?;
        let Some(choice) = parsed.choices.first() else {
            return Ok(Vec::new());
        };

        Ok(parse_tags(&choice.message.content))
    }

    /// The most frequent `#tags` across the latest records.
    async fn recent_tags(&self) -> CoreResult<Vec<String>> {
        let records = self
            .store
            .list_records(RecordQuery {
                limit: Some(RECENT_RECORDS_SCANNED),
                ..Default::default()
            })
            .await?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in &records {
            for capture in regex!(r"#(\S+)").captures_iter(&record.content) {
                if let Some(tag) = capture.get(1) {
                    *counts.entry(tag.as_str().to_owned()).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(ranked
            .into_iter()
            .take(RECENT_TAGS_KEPT)
            .map(|(tag, _)| format!("#{tag}"))
            .collect())
    }
}

fn build_prompt(content: &str, existing_tags: &[String]) -> String {
    format!(
        "# Goal\n\
         根据用户输入的【待办内容】，为其匹配最精准的一个标签（Tag）。\n\n\
         # Rules\n\
         1. **语义匹配**：首先检查【已有标签列表】中是否有标签能精准概括待办内容。\n\
         2. **禁止强行匹配**：如果已有标签与内容只有微弱关联或完全无关，请忽略已有标签。\n\
         3. **新建标签**：当没有完美匹配的已有标签时，必须根据内容生成一个新的 2-4 个字的标签。\n\
         4. **数量限制**：只返回 1 个最准确的标签。\n\n\
         # Output Format\n\
         仅返回标签文本，不包含任何解释或符号。\n\n\
         现在请分析：\n\
         待办内容： {content}\n\
         已有标签： {}",
        existing_tags.join(", ")
    )
}

/// Splits a model reply into `#`-prefixed tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .replace(',', " ")
        .split_whitespace()
        .map(|part| {
            if part.starts_with('#') {
                part.to_owned()
            } else {
                format!("#{part}")
            }
        })
        .collect()
}
