mod azure_pronunciation_assessor_test;
