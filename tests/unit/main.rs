mod cli_command_parse_tests;
