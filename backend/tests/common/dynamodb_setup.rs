use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use profile_storage::ProfileAttribute;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Helper for creating and dropping the profile table in LocalStack
pub struct DynamoDbTestSetup {
    client: Arc<DynamoDbClient>,
    pub profile_table_name: String,
}

impl DynamoDbTestSetup {
    pub async fn new(client: Arc<DynamoDbClient>) -> Self {
        let profile_table_name = Self::create_profile_table(&client).await;

        Self {
            client,
            profile_table_name,
        }
    }

    /// Creates a test profile table with a unique name
    async fn create_profile_table(client: &DynamoDbClient) -> String {
        let table_name = format!("test-profiles-{}", Uuid::new_v4());

        client
            .create_table()
            .table_name(&table_name)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(ProfileAttribute::Id.to_string())
                    .attribute_type(ScalarAttributeType::N)
                    .build()
                    .unwrap(),
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(ProfileAttribute::Id.to_string())
                    .key_type(KeyType::Hash)
                    .build()
                    .unwrap(),
            )
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .expect("Failed to create test table");

        // Wait for table to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        table_name
    }
}

impl Drop for DynamoDbTestSetup {
    fn drop(&mut self) {
        let client = self.client.clone();
        let table = self.profile_table_name.clone();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = client.delete_table().table_name(&table).send().await;
            });
        }
    }
}
