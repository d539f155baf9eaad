//! Master prompt assembly for the test-case authoring call.
//!
//! The authoring rules are fixed; only the planning text and, in
//! update mode, the flattened prior table vary per request.

use crate::diff::{MARKER_MODIFIED, MARKER_NEW, MARKER_REMOVAL};

/// Sentinel embedded when no prior table exists.
pub const NO_PRIOR_TABLE: &str = "없음";

const AUTHORING_RULES: &str = r#"너는 QA 엔지니어이며 TC 작성 전문가이다.
기획서에 작성된 UI 요소 및 Description에 따라 TC를 작성해라.
출력은 반드시 '|'로 구분된 13개 컬럼 표 형식이어야 한다.

### [핵심 미션]
- 기획서에 명시된 모든 UI 요소(아이콘 / 버튼 / 인풋박스 / 필터 등)를 빠짐없이 도출하라.

### [ISTQB 기반 테스트 설계 규칙]
1. **경계값 분석 (Boundary Value Analysis)**:
- 입력란에 제한이 있는 경우, [최솟값-1, 최솟값, 최솟값+1, 최댓값-1, 최댓값, 최댓값+1] 등 경계값을 확인하는 케이스를 반드시 포함한다.
2. **동등 분할 (Equivalence Partitioning)**:
- 유효한 입력 값(Pass)뿐만 아니라 유효하지 않은 입력 값(Fail) 군집을 정의하여 각각 최소 1개 이상의 케이스를 작성한다.
3. **에러 추측 (Error Guessing)**:
- 기획서에 명시되지 않았더라도 '특수문자 입력', '공백 입력', '중복 클릭', '뒤로가기 시 데이터 유지' 등 예상되는 결함 시나리오를 추가한다.
4. **결정 테이블 (Decision Table)**:
- 여러 조건이 복합적으로 얽힌 로직은 조건의 조합에 따른 결과 값을 각각 별개의 행으로 작성한다.

### [TC 구성 및 위계]
1. 화면 진입 및 전체 레이아웃 확인 케이스를 최상단에 배치하라.
2. **Label 위계**:
   - Label 1: 대분류 영역 명칭. 첫 번째 행은 반드시 해당 영역의 전체 구성을 확인하는 케이스여야 한다.
   - Label 2: 구체적 확인 대상. 구체적인 컴포넌트 명칭을 사용하라(예: 아이디 인풋박스, 로그인 버튼).
   - Label 3: 확인 성격 (UI 확인 / 기능 확인 / 밸리데이션 확인). Label 2와 동일하거나 해당 사항이 없으면 '-'로 표기한다.
3. 구성 요소별로 UI 확인, 기능 확인, 밸리데이션 확인 순으로 반드시 행을 생성하라.
4. 사전 조건 / 참고 컬럼은 명사형 간결체로, 각 행에서 테스트할 단 하나의 입력 조건만 명시하라.
5. 기대 결과에는 해당 행의 사전 조건에 대한 단 하나의 예상 결과만 기술하고, / 기호로 항목을 구분하라.

### [작성 예시]
| TC ID | 프로그램명 | 화면 ID | 요구사항 ID | Label 1 | Label 2 | Label 3 | 사전 조건 / 참고 | 수행 절차 | 기대 결과 | 결과 | 수행자 | 비고 |
|---|---|---|---|---|---|---|---|---|---|---|---|---|
| | 로그인 | - | - | 대분류 영역 명칭 | 구체적 확인 대상 | 확인 성격 | 아이디 미입력 | 아이디 입력 영역을 확인한다. | 가이드 문구가 노출된다. | | | |
"#;

/// Build the full prompt. `prior_table` switches the call into update
/// mode: the model is told to diff against it, preserve TC IDs and tag
/// changed rows in the note column.
pub fn build_prompt(plan_text: &str, prior_table: Option<&str>) -> String {
    let mut prompt = String::from(AUTHORING_RULES);

    if prior_table.is_some() {
        prompt.push_str("\n### [업데이트 규칙]\n");
        prompt.push_str(
            "1. 아래 [기존 테스트 케이스]와 새 기획서를 비교하여 표를 갱신하라.\n",
        );
        prompt.push_str("2. 기존 행의 TC ID / 결과 / 수행자 값은 그대로 유지하라.\n");
        prompt.push_str(&format!(
            "3. 내용이 바뀐 행은 비고에 {}, 새로 추가된 행은 {}, 기획서에서 사라진 행은 {} 표시를 넣어라. 변경 없는 행의 비고는 건드리지 않는다.\n",
            MARKER_MODIFIED, MARKER_NEW, MARKER_REMOVAL
        ));
    }

    prompt.push_str("\n[기존 테스트 케이스]\n");
    prompt.push_str(prior_table.unwrap_or(NO_PRIOR_TABLE));
    prompt.push_str("\n\n[기획서 내용]\n");
    prompt.push_str(plan_text);
    prompt
}
