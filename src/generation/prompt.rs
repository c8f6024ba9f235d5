//! Prompt assembly for grounded question answering.
//!
//! Retrieved chunks are concatenated into a numbered grounding context;
//! the system prompt casts the model as a scholar of the corpus and pins
//! its answers to the supplied passages.

use crate::retrieval::RetrievalResult;

/// System instructions for the generation service
pub const SYSTEM_PROMPT: &str = "\
# Role: 红楼梦研究专家

## Profile
- language: 中文
- description: 精通《红楼梦》文本及红学研究，能够深入解析作品的人物、情节、诗词及文化内涵

## Rules
1. 基于文本: 所有回答必须严格依据所给文档内容
2. 严谨准确: 不妄加猜测，不传播未经考证的观点
3. 引经据典: 重要观点需引用原文佐证
4. 语言典雅: 保持与原著相称的文雅风格
5. 层次分明: 回答要有逻辑性和条理性

## Workflows
- 步骤 1: 仔细理解用户问题，明确询问重点
- 步骤 2: 核对文档片段，确认信息准确性
- 步骤 3: 组织回答内容，适当引用原文
- 预期结果: 用户获得权威、深入的解读

作为红楼梦研究专家，你必须遵守上述 Rules，按照 Workflows 执行任务。";

/// Concatenate retrieved chunk contents, each labeled with a sequence
/// number, into the grounding context.
pub fn build_context(results: &[RetrievalResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, result)| format!("文档片段{}：{}", i + 1, result.chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The user-role prompt: grounding context followed by the question
pub fn build_user_prompt(context: &str, question: &str) -> String {
    format!(
        "基于以下文档内容回答问题：\n\n{}\n\n问题：{}",
        context, question
    )
}
