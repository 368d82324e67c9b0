//! MCP service implementation using rmcp.
//!
//! Defines the MySqlService struct with all MySQL tools exposed via the MCP
//! protocol using the rmcp framework's macros. Every tool converts its
//! outcome into a `CallToolResult`: failures become protocol-level tool
//! errors with a readable message, never a dropped connection or a panic.

use crate::db::{ConnectionProvider, QueryExecutor, SchemaInspector};
use crate::error::ServerResult;
use crate::tools::identifier;
use crate::tools::query::{QueryMysqlInput, QueryToolHandler};
use crate::tools::schema::{DescribeTableInput, ListTablesInput, SchemaToolHandler};
use crate::tools::search::{SearchTableInput, SearchToolHandler};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::warn;

const RESOURCE_SCHEME: &str = "mysql://";

#[derive(Clone)]
pub struct MySqlService {
    /// Shared connection provider for all database operations
    provider: Arc<ConnectionProvider>,
    /// Execution policy (timeout, row cap) applied to every statement
    executor: QueryExecutor,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl MySqlService {
    pub fn new(provider: Arc<ConnectionProvider>, executor: QueryExecutor) -> Self {
        Self {
            provider,
            executor,
            tool_router: Self::tool_router(),
        }
    }

    /// Convert a handler outcome into a tool result. Errors are reported to
    /// the client as tool errors and logged; they never abort the session.
    fn tool_result(result: ServerResult<String>) -> CallToolResult {
        match result {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!(error = %e, "Tool call failed");
                CallToolResult::error(vec![Content::text(e.tool_message())])
            }
        }
    }
}

#[tool_router]
impl MySqlService {
    #[tool(
        description = "Execute an SQL statement against the configured MySQL server.\nSELECT-style statements return a tab-separated table; INSERT/UPDATE/DELETE/DDL return the affected-row count.\nResults are capped at the configured maximum row count with an explicit truncation marker."
    )]
    async fn query_mysql(
        &self,
        Parameters(input): Parameters<QueryMysqlInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.provider.clone(), self.executor.clone());
        Ok(Self::tool_result(handler.run(input).await))
    }

    #[tool(description = "List all databases visible to the configured MySQL account.")]
    async fn list_databases(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.provider.clone());
        Ok(Self::tool_result(handler.list_databases().await))
    }

    #[tool(description = "List all tables and views in a database, sorted by name.")]
    async fn list_tables(
        &self,
        Parameters(input): Parameters<ListTablesInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.provider.clone());
        Ok(Self::tool_result(handler.list_tables(input).await))
    }

    #[tool(
        description = "Describe the columns of a table: name, type, nullability, key, default, and extra attributes, in definition order."
    )]
    async fn describe_table(
        &self,
        Parameters(input): Parameters<DescribeTableInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = SchemaToolHandler::new(self.provider.clone());
        Ok(Self::tool_result(handler.describe_table(input).await))
    }

    #[tool(
        description = "Search one column of a table for rows containing a keyword (substring match).\nThe keyword is always a bound parameter. Default limit: 20, maximum: 1000."
    )]
    async fn search_table(
        &self,
        Parameters(input): Parameters<SearchTableInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = SearchToolHandler::new(self.provider.clone(), self.executor.clone());
        Ok(Self::tool_result(handler.run(input).await))
    }
}

#[tool_handler]
impl ServerHandler for MySqlService {
    /// Each visible database is exposed as a `mysql://{name}` resource.
    /// Listing failures degrade to an empty list rather than an error so a
    /// flaky connection does not break resource discovery.
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let databases = match self.provider.acquire().await {
            Ok(pool) => SchemaInspector::list_databases(&pool).await.unwrap_or_else(|e| {
                warn!(error = %e, "Resource listing failed");
                Vec::new()
            }),
            Err(e) => {
                warn!(error = %e, "Resource listing failed");
                Vec::new()
            }
        };

        let resources = databases
            .into_iter()
            .map(|name| {
                let mut resource =
                    RawResource::new(format!("{}{}", RESOURCE_SCHEME, name), name.clone());
                resource.description = Some(format!("Database: {}", name));
                resource.mime_type = Some("text/plain".to_owned());
                resource.no_annotation()
            })
            .collect();

        Ok(ListResourcesResult {
            meta: None,
            resources,
            next_cursor: None,
        })
    }

    /// Reading a database resource returns its table names, one per line.
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let database = request
            .uri
            .strip_prefix(RESOURCE_SCHEME)
            .ok_or_else(|| {
                McpError::invalid_params(
                    format!("Unsupported resource URI: {}", request.uri),
                    None,
                )
            })?;
        let database = identifier::validate("database", database)
            .map_err(|e| McpError::invalid_params(e.tool_message(), None))?;

        let pool = self
            .provider
            .acquire()
            .await
            .map_err(|e| McpError::internal_error(e.tool_message(), None))?;
        let tables = SchemaInspector::list_tables(&pool, database)
            .await
            .map_err(|e| McpError::internal_error(e.tool_message(), None))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(tables.join("\n"), request.uri)],
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "mysql-mcp-server".to_owned(),
                title: Some("MySQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for exploring and querying a single MySQL server.\n\
                \n\
                ## Workflow\n\
                1. Call `list_databases` to see what is available\n\
                2. Call `list_tables` and `describe_table` to learn the schema\n\
                3. Use `search_table` for keyword lookups or `query_mysql` for arbitrary SQL\n\
                \n\
                ## Notes\n\
                - `query_mysql` runs any statement; mutations report affected rows\n\
                - Large result sets are truncated at the configured row cap, with a marker\n\
                - Database, table, and column arguments must be plain identifiers (no quoting)\n\
                - Each database is also exposed as a `mysql://{name}` resource; reading one\n\
                  lists its tables"
                    .to_owned(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConnectionSettings, DEFAULT_CHARSET, DEFAULT_COLLATION, DEFAULT_MYSQL_HOST,
        DEFAULT_MYSQL_PORT, DEFAULT_SQL_MODE,
    };
    use crate::error::ServerError;
    use std::time::Duration;

    fn test_service() -> MySqlService {
        let settings = ConnectionSettings {
            host: DEFAULT_MYSQL_HOST.to_string(),
            port: DEFAULT_MYSQL_PORT,
            user: "reader".to_string(),
            password: "pw".to_string(),
            database: "app_db".to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            collation: DEFAULT_COLLATION.to_string(),
            sql_mode: DEFAULT_SQL_MODE.to_string(),
        };
        MySqlService::new(
            Arc::new(ConnectionProvider::new(settings)),
            QueryExecutor::new(Duration::from_secs(30), 1000),
        )
    }

    #[test]
    fn test_get_info_advertises_tools_and_resources() {
        let info = test_service().get_info();
        assert_eq!(info.server_info.name, "mysql-mcp-server");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_resource_uri_scheme() {
        let uri = format!("{}shop", RESOURCE_SCHEME);
        assert_eq!(uri.strip_prefix(RESOURCE_SCHEME), Some("shop"));
        assert_eq!("file:///etc/passwd".strip_prefix(RESOURCE_SCHEME), None);
    }

    #[test]
    fn test_router_exposes_all_tools() {
        let service = test_service();
        let names: Vec<String> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        for tool in [
            "query_mysql",
            "list_databases",
            "list_tables",
            "describe_table",
            "search_table",
        ] {
            assert!(names.contains(&tool.to_string()), "missing {}", tool);
        }
    }

    #[test]
    fn test_errors_become_tool_errors() {
        let result = MySqlService::tool_result(Err(ServerError::argument("sql is required")));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_success_is_not_an_error() {
        let result = MySqlService::tool_result(Ok("Empty set".to_string()));
        assert_ne!(result.is_error, Some(true));
    }
}
