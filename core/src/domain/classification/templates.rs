//! Built-in instruction templates, one per contract revision.
//!
//! `{input_content}` is replaced with the OCR text and `{min_content_chars}`
//! with the configured minimum-content threshold.

pub const INPUT_PLACEHOLDER: &str = "{input_content}";
pub const MIN_CHARS_PLACEHOLDER: &str = "{min_content_chars}";

pub const DIETARY_V1_TEMPLATE: &str = r#"你是營養專家。請根據提供的 ingredients 列表，判斷這個食品是否符合「奶蛋素 (vegetarian)」與「全素 (vegan)」。

請特別注意「萃取物（如 chicken extract、beef flavor）」或「動物來源添加物」。
若成分文字少於 {min_content_chars} 個字，請回傳 vegetarian 與 vegan 皆為 false、riskyKeywords 為空陣列，reasoning 寫「成分資訊不足，無法判斷。」
全用繁體中文回應。

只回傳一個 ```json 區塊，不要有任何其他文字或說明，格式如下：
```json
{
  "vegetarian": boolean,
  "vegan": boolean,
  "reasoning": string,
  "riskyKeywords": string[]
}
```

成分：
{input_content}
"#;

pub const CATEGORY_V2_TEMPLATE: &str = r#"你是素食成分判讀專家。請根據以下食品成分，判斷屬於哪一種素食類型：

- 「全素」：不含任何動物來源成分，也不含五辛（蔥、蒜、韭、薤、興渠）。
- 「蛋奶素」：含有蛋或奶成分，但不含肉類與五辛。
- 「五葷素」：不含肉類，但含有五辛成分。
- 「非素食」：含有肉、魚、海鮮、動物油脂、明膠、動物萃取物等動物性成分。
- 「無法判斷」：成分資訊不足或無法辨識。

判斷規則：
1. 明確的動物性成分（如雞肉、豬油、魚露、明膠、胭脂蟲紅）判為「非素食」。
2. 來源不明的成分（如乳化劑、香料、調味劑）請在 reasoning 中說明風險。
3. 外文成分名稱請在 reasoning 中以括號附上中文翻譯，例如 gelatin（明膠）。
4. 若成分文字少於 {min_content_chars} 個字，type 請回傳「無法判斷」、riskyKeywords 為空陣列，reasoning 寫「成分資訊不足，無法判斷。」
5. riskyKeywords 列出導致判斷結果的成分原文；「全素」與「無法判斷」時為空陣列。

只回傳一個 ```json 區塊，不要有任何其他文字或說明，格式如下：
```json
{
  "type": "全素" | "蛋奶素" | "五葷素" | "非素食" | "無法判斷",
  "reasoning": string,
  "riskyKeywords": string[]
}
```

成分：
{input_content}
"#;

pub const SEVERITY_V3_TEMPLATE: &str = r#"你是素食成分判讀專家。請閱讀以下由包裝標示辨識出的成分文字，並依規則給出判斷。

結果類型 type 只能是下列其中之一：
- "clear"：未發現任何動物來源、五辛或可疑成分。
- "caution"：含有需留意的成分，但沒有明確的動物性成分。
- "warning"：含有明確的動物性成分。
- "unknown"：資訊不足，無法判斷。

flags 中每個成分的 level 只能是 "caution" 或 "warning"：
1. 明確的動物性成分（如雞肉、豬油、魚露、牛肉萃取物、明膠、胭脂蟲紅）→ "warning"。
2. 間接或來源不明的動物性成分（如乳化劑、單及雙脂肪酸甘油酯、天然香料、蜂蜜、乳製品、蛋）→ "caution"。
3. 五辛成分（蔥、蒜、韭、薤、興渠、洋蔥）→ "caution"。
4. 含糊的複合成分（如調味料、複方香料、醬料）→ "caution"。
5. 外文成分名稱在 explanations 中必須以括號附上中文翻譯，例如 gelatin（明膠）。

一致性要求：
- type 為 "clear" 或 "unknown" 時，flags 必須為空陣列。
- type 為 "caution" 時，flags 至少一項。
- type 為 "warning" 時，flags 至少一項 level 為 "warning"。
- 若成分文字少於 {min_content_chars} 個字，type 回傳 "unknown"，flags 為空陣列，explanations 只寫「成分資訊不足，無法判斷。」
- suggestion 為給使用者的建議；沒有建議時回傳空字串。
- 全部使用繁體中文。

只回傳一個 ```json 區塊，不要有任何其他文字、前言或說明，格式如下：
```json
{
  "type": "clear" | "caution" | "warning" | "unknown",
  "explanations": string[],
  "flags": [{ "ingredient": string, "level": "caution" | "warning" }],
  "suggestion": string
}
```

成分：
{input_content}
"#;

/// Fixed explanation attached to the insufficient-content verdict.
pub const INSUFFICIENT_CONTENT_NOTE: &str = "成分資訊不足，無法判斷。";
