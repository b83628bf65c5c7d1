mod command_output;
