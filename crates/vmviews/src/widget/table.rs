//! Data tables and two-column summary tables.

use super::{attributize, value_as_text, Widget, WidgetKind};
use crate::browser::Browser;
use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One body row with its cell texts keyed by attributized header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    element: ElementHandle,
    cells: Vec<(String, String)>,
}

impl TableRow {
    /// Text of the cell in `column`
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// `(column, text)` pairs in column order
    #[must_use]
    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// Row element handle
    #[must_use]
    pub const fn element(&self) -> &ElementHandle {
        &self.element
    }

    /// True when every `(column, text)` pair matches
    #[must_use]
    pub fn matches(&self, criteria: &[(String, String)]) -> bool {
        criteria
            .iter()
            .all(|(column, expected)| self.get(column) == Some(expected.as_str()))
    }

    /// Click the row
    pub async fn click(&self, browser: &Browser) -> ViewResult<()> {
        tracing::debug!(row = %self.element.id, "click table row");
        browser.driver().click(&self.element).await
    }

    fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .cells
            .iter()
            .map(|(c, v)| (c.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Table with a `thead` of column headers and a `tbody` of rows
#[derive(Debug, Clone)]
pub struct Table {
    locator: Locator,
}

impl Table {
    /// Table matched by `selector`
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            locator: Locator::from_selector(selector),
        }
    }

    /// Table matched by an XPath expression
    #[must_use]
    pub fn xpath(xpath: &str) -> Self {
        Self::new(Selector::xpath(xpath))
    }

    /// Attributized column names; blank headers become `column_<n>`
    pub async fn headers(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        let root = browser.element(&self.locator, None).await?;
        self.headers_in(browser, &root).await
    }

    async fn headers_in(&self, browser: &Browser, root: &ElementHandle) -> ViewResult<Vec<String>> {
        let header = Locator::new("thead th").with_visible(false);
        let mut out = Vec::new();
        for (i, th) in browser.elements(&header, Some(root)).await?.iter().enumerate() {
            let name = attributize(&browser.driver().text(th).await?);
            out.push(if name.is_empty() { format!("column_{i}") } else { name });
        }
        Ok(out)
    }

    /// Every body row
    pub async fn rows(&self, browser: &Browser) -> ViewResult<Vec<TableRow>> {
        let root = browser.element(&self.locator, None).await?;
        let headers = self.headers_in(browser, &root).await?;
        let driver = browser.driver();
        let row_locator = Locator::new("tbody tr");
        let cell_locator = Locator::new("td").with_visible(false);

        let mut rows = Vec::new();
        for tr in browser.elements(&row_locator, Some(&root)).await? {
            let mut cells = Vec::new();
            for (i, td) in browser.elements(&cell_locator, Some(&tr)).await?.iter().enumerate() {
                let column = headers
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{i}"));
                cells.push((column, driver.text(td).await?));
            }
            rows.push(TableRow { element: tr, cells });
        }
        Ok(rows)
    }

    /// Number of body rows
    pub async fn row_count(&self, browser: &Browser) -> ViewResult<usize> {
        Ok(self.rows(browser).await?.len())
    }

    /// First row matching every `(column, text)` pair
    pub async fn row(&self, browser: &Browser, criteria: &[(&str, &str)]) -> ViewResult<TableRow> {
        let owned: Vec<(String, String)> = criteria
            .iter()
            .map(|(c, v)| (attributize(c), (*v).to_string()))
            .collect();
        self.find_row(browser, &owned).await
    }

    async fn find_row(
        &self,
        browser: &Browser,
        criteria: &[(String, String)],
    ) -> ViewResult<TableRow> {
        self.rows(browser)
            .await?
            .into_iter()
            .find(|row| row.matches(criteria))
            .ok_or_else(|| ViewError::RowNotFound {
                table: self.locator.to_string(),
                criteria: render_criteria(criteria),
            })
    }
}

fn render_criteria(criteria: &[(String, String)]) -> String {
    criteria
        .iter()
        .map(|(c, v)| format!("{c}={v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl Widget for Table {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Table
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        let rows = self.rows(browser).await?;
        Ok(Value::Array(rows.iter().map(TableRow::to_value).collect()))
    }

    /// A string selects the row by its `name` column (or the first column);
    /// an object gives column criteria.
    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let criteria = match value {
            Value::Object(map) => map
                .iter()
                .map(|(c, v)| Ok((attributize(c), value_as_text(&self.locator, v)?)))
                .collect::<ViewResult<Vec<_>>>()?,
            other => {
                let text = value_as_text(&self.locator, other)?;
                let headers = self.headers(browser).await?;
                let column = if headers.iter().any(|h| h == "name") {
                    "name".to_string()
                } else {
                    headers
                        .into_iter()
                        .next()
                        .unwrap_or_else(|| "column_0".to_string())
                };
                vec![(column, text)]
            }
        };
        let row = self.find_row(browser, &criteria).await?;
        row.click(browser).await?;
        Ok(true)
    }
}

/// Details-page table whose header row carries the table title
#[derive(Debug, Clone)]
pub struct SummaryTable {
    title: String,
    locator: Locator,
}

impl SummaryTable {
    /// Summary table titled `title`
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            locator: Locator::from_selector(Selector::xpath(format!(
                "//table[./thead/tr/th[normalize-space(.)=\"{title}\"]]"
            ))),
        }
    }

    /// Table title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    async fn pairs(&self, browser: &Browser) -> ViewResult<Vec<(String, String)>> {
        let root = browser.element(&self.locator, None).await?;
        let driver = browser.driver();
        let cell = Locator::new("td").with_visible(false);
        let mut out = Vec::new();
        for tr in browser.elements(&Locator::new("tbody tr"), Some(&root)).await? {
            let cells = browser.elements(&cell, Some(&tr)).await?;
            let Some(label) = cells.first() else {
                continue;
            };
            let value = match cells.get(1) {
                Some(td) => driver.text(td).await?,
                None => String::new(),
            };
            out.push((driver.text(label).await?, value));
        }
        Ok(out)
    }

    /// Row labels
    pub async fn fields(&self, browser: &Browser) -> ViewResult<Vec<String>> {
        Ok(self.pairs(browser).await?.into_iter().map(|(l, _)| l).collect())
    }

    /// Value text of the row labelled `field`
    pub async fn get_text_of(&self, browser: &Browser, field: &str) -> ViewResult<String> {
        self.pairs(browser)
            .await?
            .into_iter()
            .find(|(label, _)| label == field)
            .map(|(_, value)| value)
            .ok_or_else(|| ViewError::RowNotFound {
                table: format!("summary {:?}", self.title),
                criteria: field.to_string(),
            })
    }
}

#[async_trait]
impl Widget for SummaryTable {
    fn kind(&self) -> WidgetKind {
        WidgetKind::SummaryTable
    }

    fn locator(&self) -> &Locator {
        &self.locator
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        let map: Map<String, Value> = self
            .pairs(browser)
            .await?
            .into_iter()
            .map(|(l, v)| (l, Value::String(v)))
            .collect();
        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDriver, MockElement, NodeId};
    use crate::widget::testing::browser;
    use serde_json::json;
    use std::sync::Arc;

    /// Fills `table` with the given headers and rows, returns the row nodes
    fn build_table(
        driver: &MockDriver,
        table: NodeId,
        headers: &[&str],
        rows: &[&[&str]],
    ) -> Vec<NodeId> {
        let thead = driver.add_child(table, MockElement::new("thead"));
        let head_row = driver.add_child(thead, MockElement::new("tr"));
        for h in headers {
            let _ = driver.add_child(head_row, MockElement::new("th").text(*h));
        }
        let tbody = driver.add_child(table, MockElement::new("tbody"));
        rows.iter()
            .map(|cells| {
                let tr = driver.add_child(tbody, MockElement::new("tr"));
                for c in *cells {
                    let _ = driver.add_child(tr, MockElement::new("td").text(*c));
                }
                tr
            })
            .collect()
    }

    mod table_tests {
        use super::*;

        const IMAGES: &str = "//div[@id=\"pre_prov_div\"]//table";

        fn image_table(driver: &MockDriver) -> Vec<NodeId> {
            let table = driver.add_root(MockElement::new("table").class("table"));
            driver.alias(&Selector::xpath(IMAGES), table);
            build_table(
                driver,
                table,
                &["", "Name", "Operating System", "Provider"],
                &[
                    &["", "rhel-7", "linux", "vsphere65"],
                    &["", "win2012", "windows", "vsphere65"],
                    &["", "rhel-7", "linux", "rhv41"],
                ],
            )
        }

        #[tokio::test]
        async fn test_headers_attributized() {
            let driver = Arc::new(MockDriver::new());
            let _ = image_table(&driver);
            let browser = browser(&driver);
            assert_eq!(
                Table::xpath(IMAGES).headers(&browser).await.unwrap(),
                vec!["column_0", "name", "operating_system", "provider"]
            );
        }

        #[tokio::test]
        async fn test_row_by_criteria() {
            let driver = Arc::new(MockDriver::new());
            let rows = image_table(&driver);
            let browser = browser(&driver);
            let table = Table::xpath(IMAGES);

            let row = table
                .row(&browser, &[("name", "rhel-7"), ("provider", "rhv41")])
                .await
                .unwrap();
            assert_eq!(row.element(), &driver.handle(rows[2]));
            assert_eq!(row.get("operating_system"), Some("linux"));

            row.click(&browser).await.unwrap();
            assert_eq!(driver.clicks_on(rows[2]), 1);
        }

        #[tokio::test]
        async fn test_row_not_found() {
            let driver = Arc::new(MockDriver::new());
            let _ = image_table(&driver);
            let browser = browser(&driver);
            let err = Table::xpath(IMAGES)
                .row(&browser, &[("Name", "centos")])
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ViewError::RowNotFound { ref criteria, .. } if criteria == "name=\"centos\""
            ));
        }

        #[tokio::test]
        async fn test_read_rows_as_objects() {
            let driver = Arc::new(MockDriver::new());
            let _ = image_table(&driver);
            let browser = browser(&driver);
            let value = Table::xpath(IMAGES).read(&browser).await.unwrap();
            assert_eq!(value.as_array().unwrap().len(), 3);
            assert_eq!(value[1]["name"], json!("win2012"));
            assert_eq!(value[1]["column_0"], json!(""));
        }

        #[tokio::test]
        async fn test_fill_string_uses_name_column() {
            let driver = Arc::new(MockDriver::new());
            let rows = image_table(&driver);
            let browser = browser(&driver);
            assert!(Table::xpath(IMAGES)
                .fill(&browser, &json!("win2012"))
                .await
                .unwrap());
            assert_eq!(driver.clicks_on(rows[1]), 1);
        }

        #[tokio::test]
        async fn test_fill_object_criteria() {
            let driver = Arc::new(MockDriver::new());
            let rows = image_table(&driver);
            let browser = browser(&driver);
            assert!(Table::xpath(IMAGES)
                .fill(&browser, &json!({"Name": "rhel-7", "Provider": "rhv41"}))
                .await
                .unwrap());
            assert_eq!(driver.clicks_on(rows[2]), 1);
            assert_eq!(driver.clicks_on(rows[0]), 0);
        }

        #[tokio::test]
        async fn test_fill_string_without_name_column() {
            let driver = Arc::new(MockDriver::new());
            let table = driver.add_root(MockElement::new("table").id("hosts"));
            let rows = build_table(
                &driver,
                table,
                &["Host", "Cluster"],
                &[&["esx1", "c1"], &["esx2", "c1"]],
            );
            let browser = browser(&driver);
            assert!(Table::new(Selector::css("table#hosts"))
                .fill(&browser, &json!("esx2"))
                .await
                .unwrap());
            assert_eq!(driver.clicks_on(rows[1]), 1);
        }
    }

    mod summary_table_tests {
        use super::*;

        fn properties(driver: &MockDriver) {
            let table = driver.add_root(
                MockElement::new("table")
                    .class("table")
                    .class("table-summary-screen"),
            );
            driver.alias(SummaryTable::new("Properties").locator().selector(), table);
            let _ = build_table(
                driver,
                table,
                &["Properties"],
                &[
                    &["Name", "web01"],
                    &["Operating System", "Red Hat Enterprise Linux 7"],
                    &["Snapshots", "0"],
                ],
            );
        }

        #[tokio::test]
        async fn test_fields_and_values() {
            let driver = Arc::new(MockDriver::new());
            properties(&driver);
            let browser = browser(&driver);
            let table = SummaryTable::new("Properties");

            assert_eq!(
                table.fields(&browser).await.unwrap(),
                vec!["Name", "Operating System", "Snapshots"]
            );
            assert_eq!(table.get_text_of(&browser, "Name").await.unwrap(), "web01");
            let value = table.read(&browser).await.unwrap();
            assert_eq!(value["Snapshots"], json!("0"));
        }

        #[tokio::test]
        async fn test_missing_field() {
            let driver = Arc::new(MockDriver::new());
            properties(&driver);
            let browser = browser(&driver);
            let err = SummaryTable::new("Properties")
                .get_text_of(&browser, "Container")
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        }
    }
}
