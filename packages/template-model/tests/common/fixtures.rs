//! Template fixtures

/// Smallest template with one resource
pub const MINIMAL_YAML: &str = "Resources:\n  B:\n    Type: X::Y::Z";

/// Same template as JSON
pub const MINIMAL_JSON: &str = r#"{"Resources": {"B": {"Type": "X::Y::Z"}}}"#;

/// Resource value indented under a scalar
pub const BAD_INDENT_YAML: &str =
    "Resources:\n  B:\n    Type: X::Y::Z\n      Properties:\n    Name: v";

/// Every section, short-form tags included
pub const FULL_YAML: &str = r#"AWSTemplateFormatVersion: '2010-09-09'
Transform:
  - AWS::Serverless-2016-10-31
Parameters:
  Env:
    Type: String
    Default: "true"
    AllowedValues: [dev, prod]
  Port:
    Type: Number
    Default: "8080"
  Suffix:
    Type: String
    Default: "123abc"
Mappings:
  RegionMap:
    us-east-1:
      Ami: ami-1
Conditions:
  IsProd: !Equals [!Ref Env, prod]
Rules:
  ProdOnly:
    RuleCondition: !Equals [!Ref Env, prod]
    Assertions:
      - Assert: !Contains [[a, b], a]
        AssertDescription: must contain a
Resources:
  Bucket:
    Type: AWS::S3::Bucket
    Condition: IsProd
    DependsOn: [Role]
    Properties:
      BucketName: !Sub '${AWS::StackName}-bucket'
      Tags:
        - Key: team
          Value: core
  Role:
    Type: AWS::IAM::Role
Outputs:
  BucketArn:
    Value: !GetAtt Bucket.Arn
    Export:
      Name: !Sub '${AWS::StackName}-arn'
Metadata:
  Owner: platform
"#;

/// Parameters whose string defaults exercise normalization, as JSON
pub const PARAMETERS_JSON: &str = r#"{
  "Parameters": {
    "Flag": {"Type": "String", "Default": "true"},
    "Port": {"Type": "Number", "Default": "8080"},
    "Name": {"Type": "String", "Default": "123abc"}
  }
}"#;

/// Template with `n` resources
pub fn fixture_n_resources(n: usize) -> String {
    let resources: String = (0..n)
        .map(|i| {
            format!(
                "  Resource{i}:\n    Type: AWS::SNS::Topic\n    Properties:\n      TopicName: topic-{i}\n      Tags:\n        - Key: index\n          Value: '{i}'\n"
            )
        })
        .collect();
    format!("Resources:\n{resources}")
}
